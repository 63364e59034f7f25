//! Column resolution.
//!
//! Columns are either fixed by the caller or derived by scanning records and
//! unioning their scalar property names in first-seen order.

use crate::feature::{is_scalar, Record};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Default number of records scanned when deriving columns.
pub const DEFAULT_SAMPLE_CAP: usize = 1000;

/// A displayed field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Resolves the displayed columns.
///
/// With `explicit` columns the list is returned verbatim and no record is
/// read. Otherwise the first `sample_cap` records (all of them when `None`)
/// are scanned; non-scalar properties (nested objects, arrays, geometries)
/// are skipped.
pub fn resolve_columns(
    records: &[Record],
    explicit: Option<&[String]>,
    sample_cap: Option<usize>,
) -> Vec<Column> {
    if let Some(names) = explicit {
        return names.iter().map(Column::new).collect();
    }

    let cap = sample_cap.unwrap_or(records.len());
    let mut names: IndexSet<String> = IndexSet::new();
    for record in records.iter().take(cap) {
        for (name, value) in record.properties().iter() {
            if is_scalar(value) && !names.contains(name) {
                names.insert(name.clone());
            }
        }
    }
    names.into_iter().map(Column::new).collect()
}

/// Column names, for logging and sort allow-lists.
pub fn column_names(columns: &[Column]) -> Vec<&str> {
    columns.iter().map(|c| c.name.as_str()).collect()
}
