//! Field and class descriptors as supplied by the metadata service.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::enums::{BehaviorHint, ConstraintKind, DataType};
use crate::error::{ModelError, Result};

/// Abstract, data-only schema for one editable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Property name in the dynamic model and parameter map.
    pub field_name: String,
    pub data_type: DataType,
    /// Lower bound: value for numbers, length for strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound: value for numbers, length for strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<BehaviorHint>,
    /// Name of the enumeration that supplies options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_type: Option<String>,
    /// Code of an application-defined special meaning, resolved via registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_type: Option<u32>,
}

impl FieldDescriptor {
    pub fn new(field_name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            field_name: field_name.into(),
            data_type,
            min: None,
            max: None,
            required: false,
            hints: Vec::new(),
            enum_type: None,
            special_type: None,
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: BehaviorHint) -> Self {
        if !self.hints.contains(&hint) {
            self.hints.push(hint);
        }
        self
    }

    #[must_use]
    pub fn with_enum_type(mut self, enum_type: impl Into<String>) -> Self {
        self.enum_type = Some(enum_type.into());
        self
    }

    #[must_use]
    pub fn with_special_type(mut self, value: u32) -> Self {
        self.special_type = Some(value);
        self
    }

    pub fn has_hint(&self, hint: BehaviorHint) -> bool {
        self.hints.contains(&hint)
    }
}

/// The two fields a cross-field constraint ties together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPair {
    pub start_field: String,
    pub end_field: String,
}

impl FieldPair {
    pub fn new(start_field: impl Into<String>, end_field: impl Into<String>) -> Self {
        Self {
            start_field: start_field.into(),
            end_field: end_field.into(),
        }
    }
}

/// Named, ordered list of field descriptors plus cross-field constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDescriptor {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub constraints: BTreeMap<ConstraintKind, FieldPair>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            fields,
            constraints: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_constraint(mut self, kind: ConstraintKind, pair: FieldPair) -> Self {
        self.constraints.insert(kind, pair);
        self
    }

    /// Find a descriptor by exact field name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.field_name == name)
    }

    /// Position of a descriptor in declaration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.field_name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.field_name.as_str())
    }

    /// Check that every field name is non-empty and unique.
    pub fn ensure_unique_names(&self) -> Result<()> {
        ensure_unique_names(&self.fields)
    }
}

/// Check that every descriptor in a list has a non-empty, unique field name.
pub fn ensure_unique_names(fields: &[FieldDescriptor]) -> Result<()> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for field in fields {
        let name = field.field_name.as_str();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyFieldName);
        }
        if !seen.insert(name) {
            return Err(ModelError::DuplicateField(name.to_string()));
        }
    }
    Ok(())
}
