//! Data model for metadata-driven forms and tables.
//!
//! Everything here is plain data: descriptors as delivered by the metadata
//! service, the scalar values that flow through forms, and the two shapes
//! those values take (flat [`DynamicModel`] and wire [`ParamMap`]).

pub mod descriptor;
pub mod enums;
pub mod error;
pub mod option;
pub mod special;
pub mod value;

pub use descriptor::{ClassDescriptor, FieldDescriptor, FieldPair, ensure_unique_names};
pub use enums::{BehaviorHint, ConstraintKind, DataType};
pub use error::{ModelError, Result};
pub use option::SelectOption;
pub use special::SpecialType;
pub use value::{DynamicModel, ParamMap, ParamValue, ScalarValue};
