use std::path::PathBuf;

pub type CloudResourceResult<T> = Result<T, CloudResourceError>;

#[derive(Debug, thiserror::Error)]
pub enum CloudResourceError {
    #[error("Failed to read service account key {path}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed service account key: {0}")]
    InvalidKey(String),

    #[error("Failed to sign IAM token request: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Yandex Cloud API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected response payload: {0}")]
    Parse(String),
}

impl CloudResourceError {
    /// Error for a non-2xx response, keeping the body for the logs
    pub fn api(status: reqwest::StatusCode, body: impl Into<String>) -> Self {
        Self::Api {
            status: status.as_u16(),
            body: body.into(),
        }
    }
}
