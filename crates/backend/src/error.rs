use thiserror::Error;

pub type Result<T> = std::result::Result<T, BackendError>;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP transport error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("bulk endpoint returned status {status}: {body}")]
    StatusError { status: u16, body: String },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}
