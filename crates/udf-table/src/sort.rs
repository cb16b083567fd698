//! Multi-key row sorting.
//!
//! Ordering rules per key:
//! 1. both null: equal; one null: null first
//! 2. mixed variants: variant rank (bool < number < text)
//! 3. text: case-insensitive, then lowercase before uppercase
//! 4. numbers and bools: natural order
//!
//! The first non-equal key decides, reversed for descending keys.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use udf_model::{DynamicModel, ScalarValue};

use crate::column::{ColumnConfig, find_column};
use crate::translate::{TranslationCache, cell_value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        })
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" | "" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(format!("Unknown sort direction: {s}")),
        }
    }
}

/// One `(field, direction)` sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    /// Parse `field` or `field:asc` / `field:desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, direction)) => (field, direction.parse()?),
            None => (s, SortDirection::Asc),
        };
        let field = field.trim();
        if field.is_empty() {
            return Err(format!("Missing field in sort key: {s}"));
        }
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

/// NaN ranks with null so numbers keep a total order.
fn rank(value: &ScalarValue) -> u8 {
    match value {
        ScalarValue::Null => 0,
        ScalarValue::Number(n) if n.is_nan() => 0,
        ScalarValue::Bool(_) => 1,
        ScalarValue::Number(_) => 2,
        ScalarValue::Text(_) => 3,
    }
}

/// Locale-style text comparison.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if folded != Ordering::Equal {
        return folded;
    }
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => return x.cmp(&y),
        }
    }
    a.chars().count().cmp(&b.chars().count())
}

/// Ascending comparison of two cell values.
pub fn compare_values(a: &ScalarValue, b: &ScalarValue) -> Ordering {
    let by_rank = rank(a).cmp(&rank(b));
    if by_rank != Ordering::Equal {
        return by_rank;
    }
    match (a, b) {
        (ScalarValue::Bool(x), ScalarValue::Bool(y)) => x.cmp(y),
        (ScalarValue::Number(x), ScalarValue::Number(y)) if !x.is_nan() && !y.is_nan() => {
            x.total_cmp(y)
        }
        (ScalarValue::Text(x), ScalarValue::Text(y)) => compare_text(x, y),
        _ => Ordering::Equal,
    }
}

fn key_value(
    key: &SortKey,
    row: &DynamicModel,
    columns: &[ColumnConfig],
    cache: &TranslationCache,
) -> ScalarValue {
    match find_column(columns, &key.field) {
        Some(column) => cell_value(column, row, cache),
        None => row.value(&key.field).clone(),
    }
}

/// Compare two rows key by key.
///
/// Fields with a column are read through the column's value accessor; other
/// fields are read raw.
pub fn compare_rows(
    a: &DynamicModel,
    b: &DynamicModel,
    keys: &[SortKey],
    columns: &[ColumnConfig],
    cache: &TranslationCache,
) -> Ordering {
    for key in keys {
        let left = key_value(key, a, columns, cache);
        let right = key_value(key, b, columns, cache);
        let ordering = compare_values(&left, &right);
        if ordering != Ordering::Equal {
            return key.direction.apply(ordering);
        }
    }
    Ordering::Equal
}

/// Stable in-place sort; rows equal on every key keep their order.
pub fn sort_rows(
    rows: &mut [DynamicModel],
    keys: &[SortKey],
    columns: &[ColumnConfig],
    cache: &TranslationCache,
) {
    if keys.is_empty() {
        return;
    }
    rows.sort_by(|a, b| compare_rows(a, b, keys, columns, cache));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_case_insensitive_with_lowercase_first() {
        assert_eq!(compare_text("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_text("a", "A"), Ordering::Less);
        assert_eq!(compare_text("B", "b"), Ordering::Greater);
        assert_eq!(compare_text("same", "same"), Ordering::Equal);
    }

    #[test]
    fn null_sorts_before_everything() {
        assert_eq!(
            compare_values(&ScalarValue::Null, &ScalarValue::Number(-1.0)),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&ScalarValue::text(""), &ScalarValue::Null),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(&ScalarValue::Null, &ScalarValue::Null),
            Ordering::Equal
        );
    }

    #[test]
    fn nan_ranks_with_null() {
        let nan = ScalarValue::Number(f64::NAN);
        let one = ScalarValue::Number(1.0);
        assert_eq!(compare_values(&nan, &one), Ordering::Less);
        assert_eq!(compare_values(&one, &nan), Ordering::Greater);
        assert_eq!(compare_values(&nan, &ScalarValue::Null), Ordering::Equal);
        assert_eq!(compare_values(&nan, &nan), Ordering::Equal);
    }

    #[test]
    fn sort_key_parsing() {
        assert_eq!("a".parse::<SortKey>().unwrap(), SortKey::asc("a"));
        assert_eq!("b:DESC".parse::<SortKey>().unwrap(), SortKey::desc("b"));
        assert!("b:sideways".parse::<SortKey>().is_err());
        assert!(":asc".parse::<SortKey>().is_err());
    }
}
