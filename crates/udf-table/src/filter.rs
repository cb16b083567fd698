//! Named filter predicates and row filtering.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use udf_model::{DynamicModel, ScalarValue};

use crate::column::{ColumnConfig, find_column};
use crate::error::{Result, TableError};
use crate::translate::{TranslationCache, cell_value};

pub const NOOP: &str = "noop";
pub const DATE_IS: &str = "dateIs";
pub const DATE_BEFORE: &str = "dateBefore";
pub const DATE_AFTER: &str = "dateAfter";

/// `(cell, filter) -> keep row`. The built-ins keep every row for an unset
/// filter value, also when called directly.
pub type FilterPredicate = fn(&ScalarValue, &ScalarValue) -> bool;

/// A filter value is unset when absent, null or an empty string.
pub fn is_unset(filter: &ScalarValue) -> bool {
    match filter {
        ScalarValue::Null => true,
        ScalarValue::Text(text) => text.is_empty(),
        _ => false,
    }
}

fn noop(_: &ScalarValue, _: &ScalarValue) -> bool {
    true
}

/// Compare calendar days; an unset filter keeps the row.
fn compare_dates(
    cell: &ScalarValue,
    filter: &ScalarValue,
    keep: fn(Ordering) -> bool,
) -> bool {
    if is_unset(filter) {
        return true;
    }
    matches!((cell.as_date(), filter.as_date()), (Some(c), Some(f)) if keep(c.cmp(&f)))
}

fn date_is(cell: &ScalarValue, filter: &ScalarValue) -> bool {
    compare_dates(cell, filter, Ordering::is_eq)
}

fn date_before(cell: &ScalarValue, filter: &ScalarValue) -> bool {
    compare_dates(cell, filter, Ordering::is_le)
}

fn date_after(cell: &ScalarValue, filter: &ScalarValue) -> bool {
    compare_dates(cell, filter, Ordering::is_ge)
}

/// A filter applied to one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveFilter {
    pub field: String,
    pub predicate: String,
    #[serde(default)]
    pub value: ScalarValue,
}

impl ActiveFilter {
    pub fn new(
        field: impl Into<String>,
        predicate: impl Into<String>,
        value: impl Into<ScalarValue>,
    ) -> Self {
        Self {
            field: field.into(),
            predicate: predicate.into(),
            value: value.into(),
        }
    }
}

/// Registry of named filter predicates.
#[derive(Debug, Clone)]
pub struct FilterService {
    predicates: BTreeMap<String, FilterPredicate>,
}

impl Default for FilterService {
    /// A service with the built-in predicates registered.
    fn default() -> Self {
        let mut service = Self::empty();
        service.register(NOOP, noop);
        service.register(DATE_IS, date_is);
        service.register(DATE_BEFORE, date_before);
        service.register(DATE_AFTER, date_after);
        service
    }
}

impl FilterService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service without any predicates.
    pub fn empty() -> Self {
        Self {
            predicates: BTreeMap::new(),
        }
    }

    /// Register a predicate. An existing registration under the same name is
    /// kept and `false` is returned.
    pub fn register(&mut self, name: impl Into<String>, predicate: FilterPredicate) -> bool {
        let name = name.into();
        if self.predicates.contains_key(&name) {
            debug!(name = %name, "filter predicate already registered");
            return false;
        }
        self.predicates.insert(name, predicate);
        true
    }

    pub fn get(&self, name: &str) -> Option<FilterPredicate> {
        self.predicates.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }

    /// Apply a named predicate; unset filter values always pass.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnknownFilter`] for an unregistered name.
    pub fn test(&self, name: &str, cell: &ScalarValue, filter: &ScalarValue) -> Result<bool> {
        let predicate = self
            .get(name)
            .ok_or_else(|| TableError::UnknownFilter(name.to_string()))?;
        Ok(is_unset(filter) || predicate(cell, filter))
    }

    /// Whether a row passes every active filter.
    pub fn matches(
        &self,
        row: &DynamicModel,
        filters: &[ActiveFilter],
        columns: &[ColumnConfig],
        cache: &TranslationCache,
    ) -> Result<bool> {
        for filter in filters {
            let cell = match find_column(columns, &filter.field) {
                Some(column) => cell_value(column, row, cache),
                None => row.value(&filter.field).clone(),
            };
            if !self.test(&filter.predicate, &cell, &filter.value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Rows passing every active filter, in input order.
    pub fn filter_rows<'a>(
        &self,
        rows: &'a [DynamicModel],
        filters: &[ActiveFilter],
        columns: &[ColumnConfig],
        cache: &TranslationCache,
    ) -> Result<Vec<&'a DynamicModel>> {
        let mut kept = Vec::with_capacity(rows.len());
        for row in rows {
            if self.matches(row, filters, columns, cache)? {
                kept.push(row);
            }
        }
        debug!(rows = rows.len(), kept = kept.len(), "filtered rows");
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_values() {
        assert!(is_unset(&ScalarValue::Null));
        assert!(is_unset(&ScalarValue::text("")));
        assert!(!is_unset(&ScalarValue::text(" ")));
        assert!(!is_unset(&ScalarValue::Bool(false)));
    }

    #[test]
    fn date_predicates_compare_calendar_days() {
        let cell = ScalarValue::text("2024-03-29T23:59:00Z");
        let same = ScalarValue::text("2024-03-29");
        let later = ScalarValue::text("2024-04-01");
        assert!(date_is(&cell, &same));
        assert!(date_before(&cell, &same));
        assert!(date_before(&cell, &later));
        assert!(date_after(&cell, &same));
        assert!(!date_after(&cell, &later));
        assert!(!date_is(&ScalarValue::Null, &same));
    }

    #[test]
    fn date_predicates_keep_rows_for_unset_filter() {
        let cell = ScalarValue::text("2024-03-29");
        for predicate in [date_is, date_before, date_after] {
            assert!(predicate(&cell, &ScalarValue::Null));
            assert!(predicate(&cell, &ScalarValue::text("")));
            assert!(predicate(&ScalarValue::Null, &ScalarValue::Null));
        }
    }
}
