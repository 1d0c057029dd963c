#![deny(unsafe_code)]
//! CLI binary for the turtle-art fractal curve renderer.
//!
//! Subcommands:
//! - `render <scene>`: expand a scene, draw it, write a PNG
//! - `expand <scene>`: print the expanded grammar string
//! - `list`: print the built-in scenes
//!
//! Logging goes through `env_logger`; set `RUST_LOG=info` (or `debug` for
//! per-generation string sizes).

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use std::path::{Path, PathBuf};
use std::process;
use turtle_art_scenes::{SceneDef, SceneKind};

#[derive(Parser)]
#[command(name = "turtle-art", about = "L-system fractal curve renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Where a scene comes from and how it is adjusted.
#[derive(clap::Args)]
struct SceneArgs {
    /// Built-in scene name (see `list`). Ignored when --file is given.
    #[arg(required_unless_present = "file")]
    scene: Option<String>,

    /// Load the scene definition from a JSON file instead.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Total iterations, counting the drawing pass.
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Scene overrides as a JSON object (iterations, width, height, angle, scale, origin).
    #[arg(long, default_value = "{}")]
    params: String,
}

#[derive(Subcommand)]
enum Command {
    /// Expand a scene, interpret it and write a PNG.
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        /// Image width in pixels.
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Image height in pixels.
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// Output file path. Defaults to `<scene>.png`.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the grammar string after `iterations - 1` rewriting steps.
    Expand {
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// List the built-in scenes.
    List,
}

fn load_scene_file(path: &Path) -> Result<SceneDef, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid scene file {}: {e}", path.display())))
}

fn resolve_scene(args: &SceneArgs) -> Result<SceneDef, CliError> {
    let def = match (&args.file, &args.scene) {
        (Some(path), _) => load_scene_file(path)?,
        (None, Some(name)) => SceneKind::from_name(name)?.definition(),
        (None, None) => return Err(CliError::Input("no scene given".into())),
    };

    let params: serde_json::Value = serde_json::from_str(&args.params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let mut def = def.with_overrides(&params);
    if let Some(iterations) = args.iterations {
        def.iterations = iterations;
    }
    Ok(def)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let names = SceneKind::list_names();
            if cli.json {
                let info = serde_json::json!({ "scenes": names });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Scenes:");
                for &name in names {
                    let def = SceneKind::from_name(name)?.definition();
                    println!(
                        "  {name:<12} axiom {:<12} angle {:>5}  iterations {}",
                        def.axiom, def.angle, def.iterations
                    );
                }
            }
        }
        Command::Expand { scene } => {
            let def = resolve_scene(&scene)?;
            let mut system = def.build()?;
            system.expand(def.expansion_steps())?;
            if cli.json {
                let info = serde_json::json!({
                    "scene": def.name,
                    "generation": system.generation(),
                    "length": system.current().len(),
                    "string": system.current(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", system.current());
            }
        }
        Command::Render {
            scene,
            width,
            height,
            output,
        } => {
            let mut def = resolve_scene(&scene)?;
            if let Some(w) = width {
                def.width = w;
            }
            if let Some(h) = height {
                def.height = h;
            }
            let output = output.unwrap_or_else(|| def.output_file());

            let stats = turtle_art_scenes::render_to_file(&def, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "scene": def.name,
                    "width": def.width,
                    "height": def.height,
                    "iterations": def.iterations,
                    "symbols": stats.symbols,
                    "segments": stats.segments,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}, {} iterations, {} segments) -> {}",
                    def.name,
                    def.width,
                    def.height,
                    def.iterations,
                    stats.segments,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        log::debug!("exiting with code {}", e.exit_code());
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(scene: Option<&str>, params: &str) -> SceneArgs {
        SceneArgs {
            scene: scene.map(String::from),
            file: None,
            iterations: None,
            params: params.to_string(),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn render_parses_overrides() {
        let cli = Cli::try_parse_from([
            "turtle-art", "render", "dragon", "-i", "4", "-W", "128", "-o", "d.png",
        ])
        .unwrap();
        match cli.command {
            Command::Render {
                scene,
                width,
                output,
                ..
            } => {
                assert_eq!(scene.scene.as_deref(), Some("dragon"));
                assert_eq!(scene.iterations, Some(4));
                assert_eq!(width, Some(128));
                assert_eq!(output, Some(PathBuf::from("d.png")));
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn render_without_scene_or_file_is_rejected() {
        assert!(Cli::try_parse_from(["turtle-art", "render"]).is_err());
    }

    #[test]
    fn resolve_builtin_applies_params_then_iterations_flag() {
        let mut a = args(Some("plant"), r#"{"iterations": 3, "width": 64}"#);
        let def = resolve_scene(&a).unwrap();
        assert_eq!(def.iterations, 3);
        assert_eq!(def.width, 64);

        a.iterations = Some(2);
        assert_eq!(resolve_scene(&a).unwrap().iterations, 2);
    }

    #[test]
    fn resolve_unknown_scene_is_engine_error() {
        let err = resolve_scene(&args(Some("koch"), "{}")).unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn resolve_bad_params_is_input_error() {
        let err = resolve_scene(&args(Some("dragon"), "{oops")).unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn missing_scene_file_is_io_error() {
        let mut a = args(None, "{}");
        a.file = Some(PathBuf::from("/nonexistent/scene.json"));
        let err = resolve_scene(&a).unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }
}
