//! Error types for the combolock crate

use thiserror::Error;

/// Main error type for the combolock crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("unknown experiment '{name}': expected {expected}")]
    UnknownExperiment { name: String, expected: String },

    #[error(
        "episode {episode} starting at state {start_state} did not terminate within {steps} steps"
    )]
    EpisodeDidNotTerminate {
        episode: usize,
        start_state: usize,
        steps: usize,
    },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}
