//! UI layout state management.
//!
//! Column widths of the table and the split of the window between the table
//! and the details view. Persisted between sessions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Width given to a column the user never resized.
pub const DEFAULT_COLUMN_WIDTH: f32 = 110.0;

/// Narrowest a column can be dragged.
pub const MIN_COLUMN_WIDTH: f32 = 40.0;

/// State related to UI layout and sizing.
///
/// Responsibilities:
/// - Tracking column widths by column name
/// - Managing the table panel width ratio
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutState {
    /// Share of the window width given to the table panel (0.0 to 1.0)
    table_split_ratio: f32,
    /// Widths of columns the user resized
    column_widths: HashMap<String, f32>,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutState {
    pub fn new() -> Self {
        Self {
            table_split_ratio: 0.6,
            column_widths: HashMap::new(),
        }
    }

    // ===== Layout Queries =====

    pub fn table_split_ratio(&self) -> f32 {
        self.table_split_ratio
    }

    /// Width of the named column.
    pub fn column_width(&self, column: &str) -> f32 {
        self.column_widths.get(column).copied().unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    /// Total width of the given columns.
    pub fn row_width<'a>(&self, columns: impl IntoIterator<Item = &'a str>) -> f32 {
        columns.into_iter().map(|c| self.column_width(c)).sum()
    }

    // ===== Mutations =====

    /// Grows or shrinks a column by `delta`, keeping it above the minimum.
    pub fn resize_column(&mut self, column: &str, delta: f32) {
        let width = (self.column_width(column) + delta).max(MIN_COLUMN_WIDTH);
        self.column_widths.insert(column.to_string(), width);
    }

    pub fn reset_column_widths(&mut self) {
        self.column_widths.clear();
    }
}
