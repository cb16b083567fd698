//! Option lists for `Select` fields, keyed by enumeration name.

use std::collections::BTreeMap;

use udf_model::SelectOption;
use udf_table::SortedOptionList;

use crate::config::{FieldConfig, InputKind};

/// Enumeration name → sorted options.
///
/// Lists may be filled incrementally with [`OptionCatalog::insert`] as
/// options arrive; compiled fields copy the list present at compile time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionCatalog {
    lists: BTreeMap<String, SortedOptionList>,
}

impl OptionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list of an enumeration.
    #[must_use]
    pub fn with_list(mut self, enum_type: impl Into<String>, list: SortedOptionList) -> Self {
        self.lists.insert(enum_type.into(), list);
        self
    }

    /// Add one option to an enumeration and return its sorted index.
    pub fn insert(&mut self, enum_type: impl Into<String>, option: SelectOption) -> usize {
        self.lists.entry(enum_type.into()).or_default().insert(option)
    }

    pub fn options(&self, enum_type: &str) -> Option<&[SelectOption]> {
        self.lists.get(enum_type).map(SortedOptionList::as_slice)
    }

    pub fn enum_types(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Copy the catalog options of a `Select` field's source into the field.
    ///
    /// Returns `false` when the field is a select whose source has no list.
    pub fn fill(&self, field: &mut FieldConfig) -> bool {
        if field.input != InputKind::Select {
            return true;
        }
        let Some(options) = field
            .options_source
            .as_deref()
            .and_then(|source| self.options(source))
        else {
            return false;
        };
        field.options = options.to_vec();
        true
    }
}
