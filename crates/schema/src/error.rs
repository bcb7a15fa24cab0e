use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("document identifier is empty")]
    EmptyIdentifier,
}
