//! Row materialization.
//!
//! A [`Row`] is rebuilt from current property values on every render. What
//! survives between renders is the row *shell*: a stable id per record plus
//! the interaction hooks attached when the shell was first built. Shells are
//! kept only for rows of the current window.

use crate::columns::Column;
use crate::feature::{FeatureKey, Record};
use crate::hooks::TableHooks;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Stable identifier of a row shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShellId(u64);

/// Pointer interactions a row reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowEvent {
    /// Primary click / activation.
    Activate,
    /// Secondary (context) click.
    SecondaryActivate,
}

/// Long-lived part of a row.
#[derive(Debug)]
pub struct RowShell {
    id: ShellId,
    record: Record,
    hooks: Vec<RowEvent>,
}

impl RowShell {
    pub fn id(&self) -> ShellId {
        self.id
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// True if the shell has a hook for `event`.
    pub fn handles(&self, event: RowEvent) -> bool {
        self.hooks.contains(&event)
    }
}

/// A renderable row: one formatted cell per column.
#[derive(Debug, Clone)]
pub struct Row {
    pub shell: ShellId,
    /// Position in the ordered index.
    pub index: usize,
    pub record: Record,
    pub cells: Vec<String>,
    pub selected: bool,
}

impl Row {
    pub fn key(&self) -> FeatureKey {
        self.record.key()
    }
}

/// Builds rows and caches their shells by record identity.
#[derive(Debug, Default)]
pub struct RowMaterializer {
    shells: HashMap<FeatureKey, RowShell>,
    by_id: HashMap<ShellId, FeatureKey>,
    next_id: u64,
    shells_built: u64,
}

impl RowMaterializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materializes `record` at `index`, reading every cell afresh.
    pub fn materialize<H: TableHooks + ?Sized>(
        &mut self,
        index: usize,
        record: &Record,
        columns: &[Column],
        hooks: &H,
    ) -> Row {
        let shell = self.shell_or_build(record);
        let cells = columns
            .iter()
            .map(|column| hooks.format_property(record, column))
            .collect();
        Row {
            shell,
            index,
            record: Rc::clone(record),
            cells,
            selected: false,
        }
    }

    fn shell_or_build(&mut self, record: &Record) -> ShellId {
        if let Some(shell) = self.shells.get(&record.key()) {
            return shell.id;
        }
        self.next_id += 1;
        let id = ShellId(self.next_id);
        // Hooks are attached exactly once, when the shell is created.
        let shell = RowShell {
            id,
            record: Rc::clone(record),
            hooks: vec![RowEvent::Activate, RowEvent::SecondaryActivate],
        };
        self.shells.insert(record.key(), shell);
        self.by_id.insert(id, record.key());
        self.shells_built += 1;
        id
    }

    /// Drops shells whose record is not in `keep`.
    pub fn evict_except(&mut self, keep: &HashSet<FeatureKey>) {
        let by_id = &mut self.by_id;
        self.shells.retain(|key, shell| {
            let retained = keep.contains(key);
            if !retained {
                by_id.remove(&shell.id);
            }
            retained
        });
    }

    /// Drops every shell.
    pub fn clear(&mut self) {
        self.shells.clear();
        self.by_id.clear();
    }

    pub fn shell(&self, id: ShellId) -> Option<&RowShell> {
        self.by_id.get(&id).and_then(|key| self.shells.get(key))
    }

    pub fn shell_for(&self, key: FeatureKey) -> Option<&RowShell> {
        self.shells.get(&key)
    }

    pub fn cached(&self) -> usize {
        self.shells.len()
    }

    /// Total shells ever created; stays flat across re-renders of the same rows.
    pub fn shells_built(&self) -> u64 {
        self.shells_built
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Feature;
    use crate::hooks::DefaultHooks;
    use serde_json::json;

    fn columns(names: &[&str]) -> Vec<Column> {
        names.iter().map(|n| Column::new(*n)).collect()
    }

    #[test]
    fn test_shell_is_reused_and_cells_reread() {
        let mut rows = RowMaterializer::new();
        let record = Feature::from_json(json!({"name": "Alta", "pop": 20000}));
        let cols = columns(&["name", "pop"]);

        let first = rows.materialize(0, &record, &cols, &DefaultHooks);
        record.set("pop", json!(21000));
        let second = rows.materialize(3, &record, &cols, &DefaultHooks);

        assert_eq!(first.shell, second.shell);
        assert_eq!(second.cells, vec!["Alta", "21000"]);
        assert_eq!(second.index, 3);
        assert_eq!(rows.shells_built(), 1);
    }

    #[test]
    fn test_missing_column_renders_placeholder() {
        let mut rows = RowMaterializer::new();
        let record = Feature::from_json(json!({"a": 1}));
        let row = rows.materialize(0, &record, &columns(&["a", "b"]), &DefaultHooks);
        assert_eq!(row.cells, vec!["1", "-"]);
    }

    #[test]
    fn test_hooks_attached_on_first_build() {
        let mut rows = RowMaterializer::new();
        let record = Feature::from_json(json!({}));
        let row = rows.materialize(0, &record, &[], &DefaultHooks);
        let shell = rows.shell(row.shell).unwrap();
        assert!(shell.handles(RowEvent::Activate));
        assert!(shell.handles(RowEvent::SecondaryActivate));
        assert!(Rc::ptr_eq(shell.record(), &record));
    }

    #[test]
    fn test_eviction() {
        let mut rows = RowMaterializer::new();
        let a = Feature::from_json(json!({}));
        let b = Feature::from_json(json!({}));
        let ra = rows.materialize(0, &a, &[], &DefaultHooks);
        let rb = rows.materialize(1, &b, &[], &DefaultHooks);

        let keep: HashSet<_> = [a.key()].into_iter().collect();
        rows.evict_except(&keep);
        assert_eq!(rows.cached(), 1);
        assert!(rows.shell(ra.shell).is_some());
        assert!(rows.shell(rb.shell).is_none());

        let rb2 = rows.materialize(1, &b, &[], &DefaultHooks);
        assert_ne!(rb.shell, rb2.shell);
        assert_eq!(rows.shells_built(), 3);
    }
}
