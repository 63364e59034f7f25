//! Current-record tracking.
//!
//! At most one record is selected. The selection is held by identity, so it
//! survives re-sorting and refreshes, and is resolved against the rendered
//! rows each time they are produced.

use crate::feature::{FeatureKey, Record};
use crate::rows::Row;
use std::collections::HashSet;
use std::rc::Rc;

/// Options for [`FeatureTable::select`](crate::FeatureTable::select).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOptions {
    /// Scroll the selected row into view when it is outside the window.
    pub scroll: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self { scroll: true }
    }
}

/// Holds the selected record, if any.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    selected: Option<Record>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection. Returns true if it changed.
    pub fn select(&mut self, record: Option<Record>) -> bool {
        let changed = match (&self.selected, &record) {
            (Some(current), Some(next)) => !Rc::ptr_eq(current, next),
            (None, None) => false,
            _ => true,
        };
        self.selected = record;
        changed
    }

    /// Drops the selection. Returns true if there was one.
    pub fn clear(&mut self) -> bool {
        self.selected.take().is_some()
    }

    pub fn get(&self) -> Option<&Record> {
        self.selected.as_ref()
    }

    pub fn key(&self) -> Option<FeatureKey> {
        self.selected.as_ref().map(|r| r.key())
    }

    pub fn is_selected(&self, key: FeatureKey) -> bool {
        self.key() == Some(key)
    }

    /// Clears the selection when its record is no longer present.
    ///
    /// Returns true if the selection was dropped.
    pub fn retain_present(&mut self, present: &HashSet<FeatureKey>) -> bool {
        match self.key() {
            Some(key) if !present.contains(&key) => {
                self.selected = None;
                true
            }
            _ => false,
        }
    }

    /// Marks the selected row and unmarks every other one.
    ///
    /// Returns the position of the selected row within `rows`, if rendered.
    pub fn annotate(&self, rows: &mut [Row]) -> Option<usize> {
        let selected = self.key();
        let mut found = None;
        for (i, row) in rows.iter_mut().enumerate() {
            row.selected = Some(row.key()) == selected;
            if row.selected {
                found = Some(i);
            }
        }
        found
    }
}
