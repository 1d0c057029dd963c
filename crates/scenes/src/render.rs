//! The generation pipeline: validate, expand, paint, flush.

use turtle_art_core::{Canvas, EngineError, RasterCanvas};
use turtle_art_lsystem::{LSystem, RenderStats};

use crate::scene::SceneDef;

/// Paints `system`'s current string onto `canvas` using the scene's
/// background and origin.
///
/// The canvas receives the gradient and the origin even if interpretation
/// then fails; callers must not flush it in that case.
pub fn paint(
    def: &SceneDef,
    system: &LSystem,
    canvas: &mut dyn Canvas,
) -> Result<RenderStats, EngineError> {
    canvas.fill_background_gradient(&def.background);
    canvas.set_origin(def.origin[0], def.origin[1]);
    system.interpret(canvas)
}

/// Renders a scene into a new [`RasterCanvas`].
///
/// Configuration is validated before any rewriting. The grammar is then
/// expanded `iterations - 1` times and interpreted once.
pub fn render(def: &SceneDef) -> Result<(RasterCanvas, RenderStats), EngineError> {
    let mut system = def.build()?;
    log::info!(
        "rendering '{}': {} iterations at {}x{}",
        def.name,
        def.iterations,
        def.width,
        def.height
    );
    system.expand(def.expansion_steps())?;

    let mut canvas = RasterCanvas::new(def.width, def.height)?;
    let stats = paint(def, &system, &mut canvas)?;
    log::info!(
        "'{}': {} symbols, {} segments",
        def.name,
        stats.symbols,
        stats.segments
    );
    Ok((canvas, stats))
}

/// Renders a scene and writes it as PNG. Nothing is written if any step fails.
#[cfg(feature = "png")]
pub fn render_to_file(
    def: &SceneDef,
    path: &std::path::Path,
) -> Result<RenderStats, EngineError> {
    let (canvas, stats) = render(def)?;
    crate::snapshot::write_png(&canvas, path)?;
    log::info!("wrote {}", path.display());
    Ok(stats)
}
