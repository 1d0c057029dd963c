//! Failures of the `turtle-art` binary and the exit codes they map to.
//!
//! | code | cause |
//! |------|-------|
//! | 0    | success |
//! | 2    | bad command line (reported by clap before `run` starts) |
//! | 10   | scene rejected: unknown name, bad configuration, malformed grammar string |
//! | 11   | reading a scene file or writing the PNG failed |
//! | 12   | `--params` or a scene file is not valid JSON for its purpose |
//! | 13   | JSON output could not be produced |

use thiserror::Error;
use turtle_art_core::EngineError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(EngineError),

    #[error("{0}")]
    Io(String),

    #[error("{0}")]
    Input(String),

    #[error("cannot encode output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

// PNG and file failures surface from the engine as `EngineError::Io`; they
// get the I/O exit code rather than the generic engine one.
impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => CliError::Io(msg),
            other => CliError::Engine(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_scene_is_an_engine_failure() {
        let err = CliError::from(EngineError::UnknownScene("koch".into()));
        assert_eq!(err.exit_code(), 10);
        assert_eq!(err.to_string(), "unknown scene: koch");
    }

    #[test]
    fn unbalanced_brackets_share_the_engine_code() {
        let err = CliError::from(EngineError::UnclosedBranch { depth: 2 });
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("never closed"));
    }

    #[test]
    fn png_write_failure_gets_the_io_code() {
        let err = CliError::from(EngineError::Io("out.png: permission denied".into()));
        assert_eq!(err.exit_code(), 11);
        assert_eq!(err.to_string(), "out.png: permission denied");
    }

    #[test]
    fn bad_params_get_the_input_code() {
        let err = CliError::Input("invalid --params JSON".into());
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn encoder_failure_gets_the_serialization_code() {
        let source = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let err = CliError::from(source);
        assert_eq!(err.exit_code(), 13);
        assert!(err.to_string().starts_with("cannot encode output"));
    }
}
