use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("field name must not be empty")]
    EmptyFieldName,
    #[error("duplicate field name: {0}")]
    DuplicateField(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
