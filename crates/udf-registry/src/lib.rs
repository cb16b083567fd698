#![deny(unsafe_code)]

//! Pluggable registry of special field types.
//!
//! Applications register the special meanings they know about at start-up;
//! the engine only ever asks "is value N registered, and under which name".

pub mod error;
pub mod registry;

pub use crate::error::RegistryError;
pub use crate::registry::{CollisionPolicy, RegisterSummary, SpecialTypeRegistry};
