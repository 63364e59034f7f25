//! Multi-key sorting of records.
//!
//! A [`SortRules`] set holds one `(column, direction)` pair per sorted column
//! in registration order; the first rule is primary. Sorting is always stable
//! so records tied on every active rule keep the order they arrived in.

use crate::feature::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDir {
    #[serde(rename = "up", alias = "asc")]
    Asc,
    #[serde(rename = "down", alias = "desc")]
    Desc,
}

impl SortDir {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDir::Asc => ordering,
            SortDir::Desc => ordering.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDir::Asc => "▲",
            SortDir::Desc => "▼",
        }
    }
}

/// One active rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRule {
    pub column: String,
    pub dir: SortDir,
}

/// Comparator over two values of the named column (either may be missing).
pub type ValueComparator<'a> = &'a dyn Fn(&str, Option<&Value>, Option<&Value>) -> Ordering;

/// Ordered set of sort rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRules {
    rules: Vec<SortRule>,
}

impl SortRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets, updates or removes (`dir = None`) the rule for a column.
    ///
    /// Updating an existing column keeps its precedence. Returns true if the
    /// rule set changed.
    pub fn set_rule(&mut self, column: &str, dir: Option<SortDir>) -> bool {
        let existing = self.rules.iter().position(|r| r.column == column);
        match (existing, dir) {
            (Some(i), Some(dir)) => {
                if self.rules[i].dir == dir {
                    return false;
                }
                self.rules[i].dir = dir;
                true
            }
            (Some(i), None) => {
                self.rules.remove(i);
                true
            }
            (None, Some(dir)) => {
                self.rules.push(SortRule {
                    column: column.to_string(),
                    dir,
                });
                true
            }
            (None, None) => false,
        }
    }

    /// Removes every rule. Returns true if there were any.
    pub fn clear(&mut self) -> bool {
        let had_rules = !self.rules.is_empty();
        self.rules.clear();
        had_rules
    }

    /// Drops rules whose column no longer passes `allowed`.
    pub fn retain_columns(&mut self, allowed: impl Fn(&str) -> bool) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| allowed(&r.column));
        self.rules.len() != before
    }

    pub fn direction(&self, column: &str) -> Option<SortDir> {
        self.rules.iter().find(|r| r.column == column).map(|r| r.dir)
    }

    pub fn rules(&self) -> &[SortRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Compares two records by every rule in order.
    pub fn compare(&self, a: &Record, b: &Record, cmp: ValueComparator<'_>) -> Ordering {
        for rule in &self.rules {
            let va = a.get(&rule.column);
            let vb = b.get(&rule.column);
            let ordering = rule.dir.apply(cmp(&rule.column, va.as_ref(), vb.as_ref()));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// [`compare_values`] ignoring the column, usable as a [`ValueComparator`].
pub fn natural_order(_column: &str, a: Option<&Value>, b: Option<&Value>) -> Ordering {
    compare_values(a, b)
}

/// Natural order over property values.
///
/// Numbers compare numerically, strings lexicographically, bools with
/// `false < true`. Missing and null values read as the empty string, which
/// sorts first. Across types the order is bools, numbers, strings, then
/// nested values, so the comparator stays total on mixed columns.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (ra, rb) = (type_rank(a), type_rank(b));
    if ra != rb {
        return ra.cmp(&rb);
    }
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) if ra == 4 => x.to_string().cmp(&y.to_string()),
        _ => Ordering::Equal,
    }
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::String(s)) if s.is_empty() => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) | Some(Value::Object(_)) => 4,
    }
}

/// Sorts records by `rules`, preserving input order among ties.
///
/// Property values are read once per record and rule before sorting.
pub fn sort_records(records: Vec<Record>, rules: &SortRules, cmp: ValueComparator<'_>) -> Vec<Record> {
    if rules.is_empty() || records.len() < 2 {
        return records;
    }

    let mut keyed: Vec<(Vec<Option<Value>>, Record)> = records
        .into_iter()
        .map(|record| {
            let keys = rules.rules().iter().map(|r| record.get(&r.column)).collect();
            (keys, record)
        })
        .collect();

    // slice::sort_by is a stable merge sort.
    keyed.sort_by(|(ka, _), (kb, _)| {
        for (rule, (va, vb)) in rules.rules().iter().zip(ka.iter().zip(kb.iter())) {
            let ordering = rule.dir.apply(cmp(&rule.column, va.as_ref(), vb.as_ref()));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });

    keyed.into_iter().map(|(_, record)| record).collect()
}
