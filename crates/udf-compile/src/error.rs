//! Error types for descriptor compilation.

use thiserror::Error;
use udf_model::{ConstraintKind, DataType, ModelError};

/// Configuration errors found while compiling a class descriptor.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompileError {
    /// The descriptor list itself is malformed.
    #[error("invalid class descriptor '{class}': {source}")]
    Model {
        class: String,
        #[source]
        source: ModelError,
    },

    /// Two descriptors share a field name.
    #[error("duplicate field '{field}' in '{class}'")]
    DuplicateField { class: String, field: String },

    /// A constraint names a field that is not in the descriptor list.
    #[error("{kind} constraint in '{class}' names missing field '{field}'")]
    MissingDescriptor {
        class: String,
        kind: ConstraintKind,
        field: String,
    },

    /// A descriptor has no input representation (only under fail-fast).
    #[error("field '{field}' has data type {data_type} with no input representation")]
    UnmappedDataType { field: String, data_type: DataType },

    /// A constraint cannot be turned into a field group.
    #[error("invalid {kind} constraint in '{class}': {message}")]
    InvalidConstraint {
        class: String,
        kind: ConstraintKind,
        message: String,
    },
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, CompileError>;
