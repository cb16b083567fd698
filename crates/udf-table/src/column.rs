//! Table column configuration compiled from field descriptors.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use udf_model::{BehaviorHint, DataType, DynamicModel, FieldDescriptor, ScalarValue};

use crate::error::Result;
use crate::filter::{DATE_IS, NOOP};

/// Display suffix for percentage columns.
pub const PERCENT_SUFFIX: &str = "%";

/// Kind of filter control offered for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Text,
    Numeric,
    Date,
    Boolean,
    Options,
    None,
}

impl FilterKind {
    pub fn for_descriptor(descriptor: &FieldDescriptor) -> Self {
        match descriptor.data_type {
            DataType::String if descriptor.has_hint(BehaviorHint::Options) => FilterKind::Options,
            DataType::String => FilterKind::Text,
            DataType::Numeric | DataType::Integer => FilterKind::Numeric,
            DataType::Date => FilterKind::Date,
            DataType::Boolean => FilterKind::Boolean,
            DataType::Binary | DataType::Unknown => FilterKind::None,
        }
    }

    /// Name of the predicate a new filter of this kind starts with.
    pub fn default_predicate(&self) -> &'static str {
        match self {
            FilterKind::Date => DATE_IS,
            _ => NOOP,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Text => "text",
            FilterKind::Numeric => "numeric",
            FilterKind::Date => "date",
            FilterKind::Boolean => "boolean",
            FilterKind::Options => "options",
            FilterKind::None => "none",
        }
    }
}

/// Declared width of a column-group cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Span {
    /// At most this many visible columns.
    Fixed(usize),
    /// Every remaining visible column up to the next group.
    Remaining,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Span::Fixed(n) => write!(f, "{n}"),
            Span::Remaining => f.write_str("*"),
        }
    }
}

impl FromStr for Span {
    type Err = String;

    /// Parse `remaining`, `*`, or a column count.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "*" || trimmed.eq_ignore_ascii_case("remaining") {
            return Ok(Span::Remaining);
        }
        trimmed
            .parse::<usize>()
            .map(Span::Fixed)
            .map_err(|_| format!("Invalid span: {s}"))
    }
}

/// Group decoration: a header cell spanning several columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnGroup {
    /// Translation key of the group header.
    pub label: String,
    pub declared: Span,
    /// Span after folding; 0 while the column is hidden.
    pub effective: usize,
}

impl ColumnGroup {
    pub fn new(label: impl Into<String>, declared: Span) -> Self {
        Self {
            label: label.into(),
            declared,
            effective: 0,
        }
    }
}

/// Computes a cell value from the whole row.
pub type Formatter = Arc<dyn Fn(&DynamicModel) -> ScalarValue + Send + Sync>;

/// Renderable definition of one table column.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    pub field_name: String,
    pub data_type: DataType,
    /// Translation key of the header.
    pub header: String,
    pub filter: FilterKind,
    /// Enumeration whose translations replace raw values (`enumType.rawValue`).
    pub translate: Option<String>,
    pub suffix: Option<String>,
    pub visible: bool,
    pub group: Option<ColumnGroup>,
    pub special_type: Option<u32>,
    #[serde(skip)]
    pub formatter: Option<Formatter>,
}

impl fmt::Debug for ColumnConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnConfig")
            .field("field_name", &self.field_name)
            .field("data_type", &self.data_type)
            .field("header", &self.header)
            .field("filter", &self.filter)
            .field("translate", &self.translate)
            .field("suffix", &self.suffix)
            .field("visible", &self.visible)
            .field("group", &self.group)
            .field("special_type", &self.special_type)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl ColumnConfig {
    /// Build a column from a descriptor.
    pub fn from_descriptor(descriptor: &FieldDescriptor, header_prefix: &str) -> Self {
        let translate = if descriptor.has_hint(BehaviorHint::Options) {
            descriptor.enum_type.clone()
        } else {
            None
        };
        let suffix = (descriptor.data_type.is_numeric()
            && descriptor.has_hint(BehaviorHint::Percentage))
        .then(|| PERCENT_SUFFIX.to_string());
        Self {
            field_name: descriptor.field_name.clone(),
            data_type: descriptor.data_type,
            header: format!("{header_prefix}{}", descriptor.field_name),
            filter: FilterKind::for_descriptor(descriptor),
            translate,
            suffix,
            visible: true,
            group: None,
            special_type: descriptor.special_type,
            formatter: None,
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: ColumnGroup) -> Self {
        self.group = Some(group);
        self
    }

    #[must_use]
    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&DynamicModel) -> ScalarValue + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Translation key for a raw value, when the column translates values.
    pub fn translation_key(&self, raw: &str) -> Option<String> {
        self.translate
            .as_ref()
            .map(|enum_type| format!("{enum_type}.{raw}"))
    }

    /// Effective group span, 0 when the column has no group.
    pub fn span(&self) -> usize {
        self.group.as_ref().map_or(0, |group| group.effective)
    }
}

/// Compile descriptors into columns, in declaration order.
///
/// # Errors
///
/// Returns an error when descriptor field names are empty or repeated.
pub fn compile_columns(
    descriptors: &[FieldDescriptor],
    header_prefix: &str,
) -> Result<Vec<ColumnConfig>> {
    udf_model::ensure_unique_names(descriptors)?;
    let columns: Vec<ColumnConfig> = descriptors
        .iter()
        .map(|descriptor| ColumnConfig::from_descriptor(descriptor, header_prefix))
        .collect();
    debug!(columns = columns.len(), "compiled columns");
    Ok(columns)
}

/// Column bound to a field.
pub fn find_column<'a>(columns: &'a [ColumnConfig], field: &str) -> Option<&'a ColumnConfig> {
    columns.iter().find(|column| column.field_name == field)
}
