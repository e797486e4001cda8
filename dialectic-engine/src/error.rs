//! Layered error types for the generation engine

use dialectic_core::{CoreError, ParseError, ProfileError};
use thiserror::Error;

/// Failure reported by an [`Accentor`](crate::accentor::Accentor)
///
/// The formatter never inspects the cause; it only logs it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccentError {
    /// The service could not be reached or refused the request
    #[error("accentor unavailable: {0}")]
    Unavailable(String),

    /// The request exceeded what the service accepts
    #[error("request of {len} characters exceeds the limit of {limit}")]
    TooLong {
        /// Characters in the rejected request
        len: usize,
        /// Largest accepted request
        limit: usize,
    },

    /// A word could not be stressed
    #[error("no stress known for '{0}'")]
    UnknownWord(String),
}

/// Failure reported by an [`ArticleSource`](crate::source::ArticleSource)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The source could not produce an article this time
    #[error("article source unavailable: {0}")]
    Unavailable(String),

    /// The source has nothing left to give
    #[error("article source exhausted")]
    Exhausted,
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Core layer error
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Article source failure
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// Too many consecutive rounds produced no new sentence
    #[error("no new sentences after {rounds} rounds ({collected} collected)")]
    SourceExhausted {
        /// Consecutive rounds without progress
        rounds: usize,
        /// Unique sentences collected before giving up
        collected: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<ProfileError> for EngineError {
    fn from(err: ProfileError) -> Self {
        EngineError::Core(CoreError::Profile(err))
    }
}

impl From<ParseError> for EngineError {
    fn from(err: ParseError) -> Self {
        EngineError::Core(CoreError::Parse(err))
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::IoError(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_error_converts_through_core() {
        let err: EngineError = ProfileError::UnsupportedLanguage("xx".to_string()).into();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::Profile(ProfileError::UnsupportedLanguage(_)))
        ));
    }

    #[test]
    fn test_exhausted_display() {
        let err = EngineError::SourceExhausted {
            rounds: 5,
            collected: 3,
        };
        assert_eq!(
            err.to_string(),
            "no new sentences after 5 rounds (3 collected)"
        );
    }

    #[test]
    fn test_source_error_converts() {
        let err: EngineError = SourceError::Exhausted.into();
        assert_eq!(err.to_string(), "source error: article source exhausted");
    }
}
