use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    /// Two descriptors share a field name, so one value would overwrite the other.
    #[error("duplicate field name in descriptors: {0}")]
    DuplicateField(String),

    #[error("descriptor field name must not be empty")]
    EmptyFieldName,

    #[error("invalid parameter map JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
