use thiserror::Error;
use udf_model::ModelError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("invalid column descriptors: {0}")]
    Model(#[from] ModelError),

    #[error("no column for field '{0}'")]
    UnknownColumn(String),

    #[error("no filter predicate named '{0}'")]
    UnknownFilter(String),
}

pub type Result<T> = std::result::Result<T, TableError>;
