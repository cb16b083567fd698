//! Compiler from field descriptors to renderable form configurations.
//!
//! The entry point is [`FormCompiler::compile`] (or the [`compile`]
//! shorthand). Per-type shapes live in [`builders`]; the output types live in
//! [`config`]; [`validate_model`] evaluates compiled validators against a
//! dynamic model.

pub mod builders;
pub mod catalog;
pub mod compiler;
pub mod config;
pub mod error;
pub mod validate;

pub use builders::{FieldBuilder, PERCENT_SUFFIX, builder_for};
pub use catalog::OptionCatalog;
pub use compiler::{CompileOptions, FormCompiler, UnmappedPolicy, compile};
pub use config::{
    CompiledField, DefaultValue, ErrorRule, FieldBinding, FieldConfig, FieldGroup,
    GroupValidator, InputKind, VALIDATION_KEY_PREFIX, Validator,
};
pub use error::{CompileError, Result};
pub use validate::{ValidationIssue, validate_model};
