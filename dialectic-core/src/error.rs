//! Error types for profile loading and sentence tree parsing

use thiserror::Error;

/// Structural failures reported by the parser.
///
/// Positions are byte offsets into the preprocessed paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An opening delimiter reached end of input without its closer
    #[error("unterminated '{opener}' opened at position {position}")]
    Unterminated {
        /// Literal of the opening delimiter
        opener: String,
        /// Position of the opening delimiter
        position: usize,
    },

    /// A closing delimiter of the wrong family ended a span
    #[error("'{opener}' opened at position {opener_position} closed by '{found}' at position {position}")]
    MismatchedCloser {
        /// Literal of the opening delimiter
        opener: String,
        /// Position of the opening delimiter
        opener_position: usize,
        /// Literal of the closer that was found instead
        found: String,
        /// Position of the unexpected closer
        position: usize,
    },

    /// Spans nest deeper than the parser accepts
    #[error("spans nested deeper than {limit} at position {position}")]
    TooDeep {
        /// Maximum accepted nesting depth
        limit: usize,
        /// Position of the opener past the limit
        position: usize,
    },

    /// A closing delimiter appeared with no span open
    #[error("unmatched closing '{literal}' at position {position}")]
    StrayCloser {
        /// Literal of the closing delimiter
        literal: String,
        /// Position of the closing delimiter
        position: usize,
    },
}

/// Errors raised while loading or compiling a character profile
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Configuration loading or parsing error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Unsupported language requested
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Profile parsed but violates a structural rule
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

/// Top-level error for the core crate
#[derive(Debug, Error)]
pub enum CoreError {
    /// Parser failure
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Profile failure
    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
