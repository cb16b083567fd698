//! Column engine for metadata-driven tables.
//!
//! Columns are compiled from the same field descriptors as forms. Every read
//! of a cell goes through [`cell_value`], so sorting and filtering see what the
//! user sees.

pub mod colspan;
pub mod column;
pub mod error;
pub mod filter;
pub mod options;
pub mod sort;
pub mod translate;
pub mod visibility;

pub use colspan::{fold_column_groups, set_visible};
pub use column::{
    ColumnConfig, ColumnGroup, FilterKind, Formatter, PERCENT_SUFFIX, Span, compile_columns,
    find_column,
};
pub use error::{Result, TableError};
pub use filter::{
    ActiveFilter, DATE_AFTER, DATE_BEFORE, DATE_IS, FilterPredicate, FilterService, NOOP,
    is_unset,
};
pub use options::{DISPLAY_SEPARATOR, SortedOptionList, compose_display};
pub use sort::{SortDirection, SortKey, compare_rows, compare_text, compare_values, sort_rows};
pub use translate::{TranslationCache, Translator, cell_value, display_text};
pub use visibility::{VisibilitySettings, resolve_visibility};
