//! Translated-value cache and the cell value accessor.
//!
//! Rendering, sorting and filtering all read cells through [`cell_value`], so
//! a column with a formatter or translation is never compared on its raw
//! value.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;
use udf_model::{DynamicModel, ScalarValue};

use crate::column::ColumnConfig;

/// Source of display strings for translation keys.
///
/// `None` means "not available yet"; the caller may supply the string later
/// through [`TranslationCache::insert`].
pub trait Translator {
    fn translate(&self, key: &str) -> Option<String>;
}

impl<F> Translator for F
where
    F: Fn(&str) -> Option<String>,
{
    fn translate(&self, key: &str) -> Option<String> {
        self(key)
    }
}

impl Translator for BTreeMap<String, String> {
    fn translate(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Translator for HashMap<String, String> {
    fn translate(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Per-column memo of translated values, keyed by raw value.
#[derive(Debug, Clone, Default)]
pub struct TranslationCache {
    resolved: HashMap<String, HashMap<String, String>>,
    /// `(field, raw)` pairs requested but not yet answered.
    pending: BTreeSet<(String, String)>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str, raw: &str) -> Option<&str> {
        self.resolved
            .get(field)
            .and_then(|values| values.get(raw))
            .map(String::as_str)
    }

    /// Record a translation, e.g. one that arrived after the first request.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        raw: impl Into<String>,
        translated: impl Into<String>,
    ) {
        let field = field.into();
        let raw = raw.into();
        self.pending.remove(&(field.clone(), raw.clone()));
        self.resolved
            .entry(field)
            .or_default()
            .insert(raw, translated.into());
    }

    /// Translation of one raw value, asking the translator at most once.
    pub fn resolve(
        &mut self,
        column: &ColumnConfig,
        raw: &str,
        translator: &dyn Translator,
    ) -> Option<&str> {
        let key = column.translation_key(raw)?;
        let field = column.field_name.as_str();
        let known = self
            .resolved
            .get(field)
            .is_some_and(|values| values.contains_key(raw));
        let waiting = self.pending.contains(&(field.to_string(), raw.to_string()));
        if !known && !waiting {
            match translator.translate(&key) {
                Some(translated) => self.insert(field, raw, translated),
                None => {
                    self.pending.insert((field.to_string(), raw.to_string()));
                }
            }
        }
        self.get(field, raw)
    }

    /// Resolve every distinct raw value of the translating columns.
    ///
    /// Returns the number of translator calls made.
    pub fn warm(
        &mut self,
        columns: &[ColumnConfig],
        rows: &[DynamicModel],
        translator: &dyn Translator,
    ) -> usize {
        let mut requested = 0;
        for column in columns.iter().filter(|column| column.translate.is_some()) {
            let distinct: BTreeSet<String> = rows
                .iter()
                .map(|row| row.value(&column.field_name))
                .filter(|value| !value.is_null())
                .map(ToString::to_string)
                .collect();
            for raw in distinct {
                if self.get(&column.field_name, &raw).is_none()
                    && !self.is_pending(&column.field_name, &raw)
                {
                    requested += 1;
                }
                self.resolve(column, &raw, translator);
            }
        }
        debug!(requested, pending = self.pending.len(), "warmed translation cache");
        requested
    }

    pub fn is_pending(&self, field: &str, raw: &str) -> bool {
        self.pending.contains(&(field.to_string(), raw.to_string()))
    }

    /// Raw values of a field still waiting for a translation.
    pub fn pending(&self, field: &str) -> Vec<&str> {
        self.pending
            .iter()
            .filter(|(pending_field, _)| pending_field == field)
            .map(|(_, raw)| raw.as_str())
            .collect()
    }

    /// Number of resolved translations across all columns.
    pub fn len(&self) -> usize {
        self.resolved.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.resolved.clear();
        self.pending.clear();
    }
}

/// Value of a cell: formatter output, else translated value, else raw value.
///
/// An untranslated value (not cached yet) falls back to the raw value.
pub fn cell_value(column: &ColumnConfig, row: &DynamicModel, cache: &TranslationCache) -> ScalarValue {
    if let Some(formatter) = &column.formatter {
        return formatter(row);
    }
    let raw = row.value(&column.field_name);
    if column.translate.is_some()
        && !raw.is_null()
        && let Some(translated) = cache.get(&column.field_name, &raw.to_string())
    {
        return ScalarValue::text(translated);
    }
    raw.clone()
}

/// Cell text as shown to the user, with the column suffix.
pub fn display_text(column: &ColumnConfig, row: &DynamicModel, cache: &TranslationCache) -> String {
    let value = cell_value(column, row, cache);
    match (&column.suffix, value.is_null()) {
        (Some(suffix), false) => format!("{value}{suffix}"),
        _ => value.to_string(),
    }
}
