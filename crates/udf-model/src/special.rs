use serde::{Deserialize, Serialize};

/// Application-defined meaning attached to a user-defined field.
///
/// Values are unique within a registry; names are free text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecialType {
    pub value: u32,
    pub name: String,
}

impl SpecialType {
    pub fn new(value: u32, name: impl Into<String>) -> Self {
        Self {
            value,
            name: name.into(),
        }
    }
}
