//! Column-group colspan folding.

use tracing::debug;

use crate::column::{ColumnConfig, Span};
use crate::error::{Result, TableError};

/// Recompute effective spans of grouped columns.
///
/// One left-to-right pass over the visible columns. A grouped column spans
/// `min(declared, distance to the next visible grouped column)`; the cursor
/// then skips the folded range. Hidden grouped columns get span 0.
pub fn fold_column_groups(columns: &mut [ColumnConfig]) {
    let visible: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, column)| column.visible)
        .map(|(index, _)| index)
        .collect();

    for column in columns.iter_mut() {
        if let Some(group) = column.group.as_mut() {
            group.effective = 0;
        }
    }

    let mut cursor = 0;
    while cursor < visible.len() {
        let index = visible[cursor];
        let Some(declared) = columns[index].group.as_ref().map(|group| group.declared) else {
            cursor += 1;
            continue;
        };
        let next_group = visible[cursor + 1..]
            .iter()
            .position(|&later| columns[later].group.is_some())
            .map_or(visible.len(), |offset| cursor + 1 + offset);
        let distance = next_group - cursor;
        let effective = match declared {
            Span::Fixed(n) => n.min(distance),
            Span::Remaining => distance,
        };
        if let Some(group) = columns[index].group.as_mut() {
            group.effective = effective;
        }
        cursor += effective.max(1);
    }
    debug!(
        columns = columns.len(),
        visible = visible.len(),
        "folded column groups"
    );
}

/// Show or hide a column and refold the groups.
///
/// # Errors
///
/// Returns [`TableError::UnknownColumn`] when no column is bound to `field`.
pub fn set_visible(columns: &mut [ColumnConfig], field: &str, visible: bool) -> Result<()> {
    let column = columns
        .iter_mut()
        .find(|column| column.field_name == field)
        .ok_or_else(|| TableError::UnknownColumn(field.to_string()))?;
    column.visible = visible;
    fold_column_groups(columns);
    Ok(())
}
