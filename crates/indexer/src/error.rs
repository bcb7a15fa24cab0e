use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Schema error: {0}")]
    SchemaError(#[from] docfeed_schema::SchemaError),

    #[error("Backend error: {0}")]
    BackendError(#[from] docfeed_backend::BackendError),

    #[error("Decode error: {0}")]
    DecodeError(#[from] std::string::FromUtf8Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Pass cancelled")]
    Cancelled,
}

impl IndexerError {
    /// Content errors are the ones [`ParseFailureMode::Skip`] may
    /// swallow; everything else stays fatal for the pass.
    ///
    /// [`ParseFailureMode::Skip`]: crate::ParseFailureMode::Skip
    pub(crate) fn is_content_error(&self) -> bool {
        matches!(self, Self::SchemaError(_) | Self::DecodeError(_))
    }
}
