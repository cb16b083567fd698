//! Per-user visibility of special-type columns.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use udf_registry::SpecialTypeRegistry;

use crate::colspan::fold_column_groups;
use crate::column::ColumnConfig;

/// Visibility switches keyed by special type name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilitySettings(BTreeMap<String, bool>);

impl VisibilitySettings {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, special_type: impl Into<String>, visible: bool) -> Self {
        self.0.insert(special_type.into(), visible);
        self
    }

    pub fn set(&mut self, special_type: impl Into<String>, visible: bool) {
        self.0.insert(special_type.into(), visible);
    }

    pub fn get(&self, special_type: &str) -> Option<bool> {
        self.0.get(special_type).copied()
    }
}

/// Apply visibility settings to columns carrying a special type, then refold.
///
/// Codes missing from the registry, and names without a setting, leave the
/// column as it is. Returns the number of columns whose visibility changed.
pub fn resolve_visibility(
    columns: &mut [ColumnConfig],
    settings: &VisibilitySettings,
    registry: &SpecialTypeRegistry,
) -> usize {
    let mut changed = 0;
    for column in columns.iter_mut() {
        let Some(code) = column.special_type else {
            continue;
        };
        let Some(special) = registry.get_by_value(code) else {
            debug!(field = %column.field_name, code, "special type not registered");
            continue;
        };
        if let Some(visible) = settings.get(&special.name)
            && column.visible != visible
        {
            column.visible = visible;
            changed += 1;
        }
    }
    fold_column_groups(columns);
    changed
}
