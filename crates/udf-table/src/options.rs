//! Option list kept sorted while entries arrive one at a time.

use udf_model::SelectOption;

/// Separator between the parts of a composed display string.
pub const DISPLAY_SEPARATOR: &str = " / ";

/// Compose `category / sub-category / kind`, skipping missing or empty parts.
pub fn compose_display(
    category: Option<&str>,
    sub_category: Option<&str>,
    kind: Option<&str>,
) -> String {
    [category, sub_category, kind]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(DISPLAY_SEPARATOR)
}

/// Options sorted by display text (case-sensitive, byte order).
///
/// Each insert binary-searches its position instead of re-sorting. Equal
/// display texts keep arrival order; a key that arrives again replaces its
/// earlier entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedOptionList {
    options: Vec<SelectOption>,
}

impl SortedOptionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an option and return its index.
    pub fn insert(&mut self, option: SelectOption) -> usize {
        if let Some(existing) = self.options.iter().position(|o| o.key == option.key) {
            self.options.remove(existing);
        }
        let index = self
            .options
            .partition_point(|o| o.display.as_str() <= option.display.as_str());
        self.options.insert(index, option);
        index
    }

    /// Insert an option whose display is composed from its parts.
    pub fn insert_parts(
        &mut self,
        key: impl Into<String>,
        category: Option<&str>,
        sub_category: Option<&str>,
        kind: Option<&str>,
    ) -> usize {
        self.insert(SelectOption::new(
            key,
            compose_display(category, sub_category, kind),
        ))
    }

    pub fn get(&self, key: &str) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.key == key)
    }

    pub fn as_slice(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectOption> {
        self.options.iter()
    }

    pub fn displays(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.display.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn into_vec(self) -> Vec<SelectOption> {
        self.options
    }
}

impl Extend<SelectOption> for SortedOptionList {
    fn extend<I: IntoIterator<Item = SelectOption>>(&mut self, iter: I) {
        for option in iter {
            self.insert(option);
        }
    }
}

impl FromIterator<SelectOption> for SortedOptionList {
    fn from_iter<I: IntoIterator<Item = SelectOption>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}
