//! Strategy hooks injected into the table.
//!
//! Instead of subclassing a base list control, callers customise column
//! derivation, cell formatting, search text and value ordering by passing a
//! [`TableHooks`] implementation. Every method has a default.

use crate::columns::{resolve_columns, Column};
use crate::feature::{Feature, Record};
use crate::sort;
use serde_json::Value;
use std::cmp::Ordering;

/// Placeholder rendered for missing values.
pub const MISSING_PLACEHOLDER: &str = "-";

pub trait TableHooks {
    /// Derives the displayed columns for a refresh.
    fn resolve_columns(
        &self,
        records: &[Record],
        explicit: Option<&[String]>,
        sample_cap: Option<usize>,
    ) -> Vec<Column> {
        resolve_columns(records, explicit, sample_cap)
    }

    /// Cell text for a property.
    fn format_property(&self, feature: &Feature, column: &Column) -> String {
        format_value(feature.get(&column.name).as_ref())
    }

    /// Text matched by [`FeatureTable::find`](crate::FeatureTable::find).
    fn searchable_text(&self, feature: &Feature, column: &Column) -> String {
        match feature.get(&column.name) {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Order between two property values of one column.
    fn compare_values(&self, _column: &str, a: Option<&Value>, b: Option<&Value>) -> Ordering {
        sort::compare_values(a, b)
    }
}

/// The stock behaviour.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl TableHooks for DefaultHooks {}

/// Default cell formatting: the raw value, or `"-"` when missing or null.
pub fn format_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING_PLACEHOLDER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
