use domain_cloud_resources::CloudResourceError;
use std::time::Duration;
use thiserror::Error;

/// Result type for assistant operations
pub type AssistantResult<T> = Result<T, AssistantError>;

/// Errors raised while handling a message
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Wrong number or type of command arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Language model returned an error or an unusable payload
    #[error("Language model error: {0}")]
    LanguageModel(String),

    /// Language model endpoint answered with a non-2xx status
    #[error("Language model API error ({status}): {body}")]
    LanguageModelApi { status: u16, body: String },

    /// Inventory lookup failed
    #[error("Inventory error: {0}")]
    Inventory(#[from] CloudResourceError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Collaborator did not answer in time
    #[error("{collaborator} timed out after {elapsed:?}")]
    Timeout {
        collaborator: &'static str,
        elapsed: Duration,
    },
}
