//! Table configuration.

use crate::columns::DEFAULT_SAMPLE_CAP;
use crate::error::TableError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Row height in pixels (shared by the table and its host panel)
pub const ROW_HEIGHT: f32 = 22.0;

/// Options controlling a [`FeatureTable`](crate::FeatureTable).
///
/// Every field has a default, so a partial JSON document is a valid config:
///
/// ```
/// use rlayertable::TableOptions;
///
/// let options = TableOptions::from_json_str(r#"{"row_height": 18.0, "columns": ["name"]}"#).unwrap();
/// assert_eq!(options.row_height, 18.0);
/// assert_eq!(options.debounce_ms, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    pub row_height: f32,
    /// Rows per page; defaults to the rows fitting in the viewport.
    pub page_size: Option<usize>,
    /// Quiet period collapsing bursts of store notifications.
    pub debounce_ms: u64,
    /// Records scanned when deriving columns (`None` scans all).
    pub column_sample_cap: Option<usize>,
    /// Fixed columns; derived from the records when `None`.
    pub columns: Option<Vec<String>>,
    /// Allow-list of sortable columns; every column is sortable when `None`.
    pub sortable_columns: Option<Vec<String>>,
    /// Share of the host viewport the list may occupy.
    pub max_height_ratio: f32,
    /// Smallest list height in pixels.
    pub min_height: f32,
    pub collapsed: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            row_height: ROW_HEIGHT,
            page_size: None,
            debounce_ms: 100,
            column_sample_cap: Some(DEFAULT_SAMPLE_CAP),
            columns: None,
            sortable_columns: None,
            max_height_ratio: 0.8,
            min_height: ROW_HEIGHT * 3.0,
            collapsed: false,
        }
    }
}

impl TableOptions {
    pub fn from_json_str(json: &str) -> Result<Self, TableError> {
        let options: Self = serde_json::from_str(json)?;
        Ok(options.sanitized())
    }

    pub fn to_json_string(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Replaces unusable values with defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            log::warn!("invalid row_height {}; using {}", self.row_height, defaults.row_height);
            self.row_height = defaults.row_height;
        }
        if self.page_size == Some(0) {
            self.page_size = None;
        }
        if !(self.max_height_ratio.is_finite() && self.max_height_ratio > 0.0) {
            self.max_height_ratio = defaults.max_height_ratio;
        }
        if !self.min_height.is_finite() || self.min_height < 0.0 {
            self.min_height = defaults.min_height;
        }
        self
    }
}
