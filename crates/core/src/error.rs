//! Error types for the turtle-art core.

use thiserror::Error;

/// Errors produced while configuring, expanding, interpreting or writing a scene.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero (or overflowed) when creating a canvas.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// The turtle step length was not a finite positive number.
    #[error("invalid step length {0}: must be finite and greater than zero")]
    InvalidStepLength(f64),

    /// A scene asked for zero iterations.
    #[error("invalid iteration count: at least one iteration is required")]
    InvalidIterations,

    /// A rule or binding key was not exactly one character.
    #[error("invalid symbol '{0}': rule and binding keys must be a single character")]
    InvalidSymbol(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A scene name cannot be used as an output file stem.
    #[error("invalid scene name '{0}': must be non-empty and contain no path separators")]
    InvalidSceneName(String),

    /// A requested scene name is not in the registry.
    #[error("unknown scene: {0}")]
    UnknownScene(String),

    /// A pop bracket was met while the snapshot stack was empty.
    #[error("malformed grammar string: unmatched ']' at symbol {index}")]
    StackUnderflow { index: usize },

    /// The string ended while branches were still open.
    #[error("malformed grammar string: {depth} '[' never closed")]
    UnclosedBranch { depth: usize },

    /// A rewriting step would grow the string past the configured limit.
    #[error("expansion limit exceeded: next string has {len} symbols, limit is {limit}")]
    ExpansionLimit { len: usize, limit: usize },

    /// The output image could not be written.
    #[error("i/o error: {0}")]
    Io(String),
}

impl EngineError {
    /// True for errors caused by unbalanced brackets in the expanded string.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            EngineError::StackUnderflow { .. } | EngineError::UnclosedBranch { .. }
        )
    }
}
