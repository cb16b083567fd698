//! Type-safe tags for field descriptor metadata.
//!
//! The metadata service sends these as upper-case strings. Unknown tags
//! deserialize to an `Unknown` variant instead of failing the whole
//! descriptor set, so one new server-side tag cannot break a form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Data type of a single field value.
///
/// `Numeric` and `Integer` form the numeric family; the codec coerces their
/// values to numbers and the compiler renders them as number inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    /// Free text, password, email or option list depending on hints.
    String,
    /// Decimal number.
    Numeric,
    /// Whole number.
    Integer,
    /// Calendar date (`YYYY-MM-DD`).
    Date,
    /// True/false flag.
    Boolean,
    /// Opaque binary payload. Has no input representation.
    Binary,
    /// Any tag this build does not know.
    #[serde(other)]
    Unknown,
}

impl DataType {
    /// Returns the wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "STRING",
            DataType::Numeric => "NUMERIC",
            DataType::Integer => "INTEGER",
            DataType::Date => "DATE",
            DataType::Boolean => "BOOLEAN",
            DataType::Binary => "BINARY",
            DataType::Unknown => "UNKNOWN",
        }
    }

    /// Returns true for the numeric family (`Numeric`, `Integer`).
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Numeric | DataType::Integer)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    /// Parse a data type tag (case-insensitive, common aliases accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        match normalized.as_str() {
            "STRING" | "TEXT" | "CHAR" => Ok(DataType::String),
            "NUMERIC" | "DECIMAL" | "DOUBLE" | "NUMBER" => Ok(DataType::Numeric),
            "INTEGER" | "INT" | "LONG" => Ok(DataType::Integer),
            "DATE" => Ok(DataType::Date),
            "BOOLEAN" | "BOOL" => Ok(DataType::Boolean),
            "BINARY" | "BLOB" => Ok(DataType::Binary),
            _ => Err(format!("Unknown data type: {s}")),
        }
    }
}

/// Rendering/validation hint attached to a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BehaviorHint {
    /// Numeric value shown with a `%` suffix.
    Percentage,
    /// Masked text input.
    Password,
    /// Text input validated as an email address.
    Email,
    /// Value chosen from an enumerated option list (see `enum_type`).
    Options,
    /// Date that may not lie in the past.
    DateFuture,
    #[serde(other)]
    Unknown,
}

impl BehaviorHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorHint::Percentage => "PERCENTAGE",
            BehaviorHint::Password => "PASSWORD",
            BehaviorHint::Email => "EMAIL",
            BehaviorHint::Options => "OPTIONS",
            BehaviorHint::DateFuture => "DATE_FUTURE",
            BehaviorHint::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for BehaviorHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BehaviorHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "PERCENTAGE" | "PERCENT" => Ok(BehaviorHint::Percentage),
            "PASSWORD" => Ok(BehaviorHint::Password),
            "EMAIL" => Ok(BehaviorHint::Email),
            "OPTIONS" | "ENUM" | "SELECT" => Ok(BehaviorHint::Options),
            "DATE_FUTURE" | "FUTURE" => Ok(BehaviorHint::DateFuture),
            _ => Err(format!("Unknown behavior hint: {s}")),
        }
    }
}

/// Kind of cross-field constraint a class descriptor may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintKind {
    /// Start date must not be after end date.
    DateRange,
}

impl ConstraintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::DateRange => "DATE_RANGE",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConstraintKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "DATE_RANGE" => Ok(ConstraintKind::DateRange),
            _ => Err(format!("Unknown constraint kind: {s}")),
        }
    }
}
