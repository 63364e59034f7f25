//! The windowed record table.
//!
//! [`FeatureTable`] binds to one record source and keeps its derived state in
//! sync with it: resolved columns, the ordered index, the window and the
//! rendered rows. Each mutation re-enters the pipeline at the earliest stage
//! it affects:
//!
//! - store change or [`refresh`](FeatureTable::refresh): columns, sort, window, render
//! - sort rule change: sort, window, render
//! - scroll or resize: window, then render only if the window moved
//! - selection change: selection marks on the rendered rows

use crate::columns::{column_names, Column};
use crate::debounce::Debouncer;
use crate::error::TableError;
use crate::feature::{FeatureKey, Record};
use crate::hooks::{DefaultHooks, TableHooks};
use crate::host::HostContext;
use crate::layout::{LayoutController, LayoutMetrics, LayoutMode};
use crate::options::TableOptions;
use crate::rows::{Row, RowEvent, RowMaterializer, ShellId};
use crate::selection::{SelectOptions, SelectionTracker};
use crate::sort::{sort_records, SortDir, SortRules};
use crate::source::{RecordSource, SourceCapabilities, StoreAdapter};
use crate::window::{recenter_offset, rows_per_viewport, Window, WindowManager, WindowRequest};
use serde_json::Value;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Instant;

/// Notifications for the host, collected until [`FeatureTable::drain_events`].
#[derive(Debug, Clone)]
pub enum TableEvent {
    /// The selection changed, or a row was activated.
    Select {
        record: Option<Record>,
        /// Set for secondary (context) activation of a row.
        secondary: bool,
    },
    /// A sort rule was added, changed or removed (`direction: None`).
    Sort {
        column: String,
        direction: Option<SortDir>,
    },
    /// The list height changed.
    Resize { height: f32 },
    Collapse { collapsed: bool },
}

/// How often each pipeline stage ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub refreshes: u64,
    pub sorts: u64,
    pub window_recomputes: u64,
    pub renders: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Refresh,
    Sort,
    Window,
}

/// A sortable, windowed table over a live record source.
pub struct FeatureTable<H: TableHooks = DefaultHooks> {
    host: Rc<dyn HostContext>,
    hooks: H,
    options: TableOptions,
    adapter: Option<StoreAdapter>,

    // ===== Derived State =====
    columns: Vec<Column>,
    /// Records in source order as of the last refresh.
    source_order: Vec<Record>,
    /// The ordered index.
    ordered: Vec<Record>,
    rules: SortRules,
    windows: WindowManager,
    window: Window,
    materializer: RowMaterializer,
    rows: Vec<Row>,
    selection: SelectionTracker,
    layout: LayoutController,
    debouncer: Debouncer,

    // ===== Host Interaction =====
    scroll_offset: f32,
    scroll_request: Option<f32>,
    collapsed: bool,
    events: Vec<TableEvent>,
    stats: PipelineStats,
}

impl FeatureTable<DefaultHooks> {
    pub fn new(host: Rc<dyn HostContext>, options: TableOptions) -> Self {
        Self::with_hooks(host, options, DefaultHooks)
    }
}

impl<H: TableHooks> FeatureTable<H> {
    /// Creates an unbound table using custom strategy hooks.
    pub fn with_hooks(host: Rc<dyn HostContext>, options: TableOptions, hooks: H) -> Self {
        let options = options.sanitized();
        Self {
            host,
            hooks,
            adapter: None,
            columns: Vec::new(),
            source_order: Vec::new(),
            ordered: Vec::new(),
            rules: SortRules::new(),
            windows: WindowManager::new(),
            window: Window::default(),
            materializer: RowMaterializer::new(),
            rows: Vec::new(),
            selection: SelectionTracker::new(),
            layout: LayoutController::new(options.min_height, options.max_height_ratio),
            debouncer: Debouncer::new(options.debounce()),
            scroll_offset: 0.0,
            scroll_request: None,
            collapsed: options.collapsed,
            events: Vec::new(),
            stats: PipelineStats::default(),
            options,
        }
    }

    // ===== Source Binding =====

    /// Binds the table to `source`, replacing any previous subscription, and
    /// refreshes synchronously.
    pub fn set_records(&mut self, source: impl Into<RecordSource>) -> SourceCapabilities {
        if let Some(mut previous) = self.adapter.take() {
            previous.detach();
        }
        let adapter = StoreAdapter::attach(source.into(), Rc::clone(&self.host));
        let capabilities = adapter.capabilities();
        self.adapter = Some(adapter);

        self.debouncer.cancel();
        self.materializer.clear();
        self.windows.reset();
        self.run_from(Stage::Refresh);
        capabilities
    }

    /// Unsubscribes from the source and drops every derived product.
    pub fn detach(&mut self) {
        if let Some(mut adapter) = self.adapter.take() {
            adapter.detach();
        }
        self.debouncer.cancel();
        self.source_order.clear();
        self.ordered.clear();
        self.rows.clear();
        self.materializer.clear();
        self.windows.reset();
        self.window = Window::default();
        if self.selection.clear() {
            self.events.push(TableEvent::Select {
                record: None,
                secondary: false,
            });
        }
    }

    pub fn is_bound(&self) -> bool {
        self.adapter.is_some()
    }

    pub fn capabilities(&self) -> Option<SourceCapabilities> {
        self.adapter.as_ref().map(StoreAdapter::capabilities)
    }

    // ===== Columns =====

    /// Fixes the displayed columns.
    pub fn set_columns(&mut self, columns: Vec<String>) {
        self.options.columns = Some(columns);
        self.run_from(Stage::Refresh);
    }

    /// Goes back to deriving columns from the records.
    pub fn clear_columns(&mut self) {
        self.options.columns = None;
        self.run_from(Stage::Refresh);
    }

    /// Replaces the sortable-column allow-list (`None` allows every column).
    ///
    /// Rules on columns that are no longer allowed are dropped.
    pub fn set_sortable_columns(&mut self, columns: Option<Vec<String>>) {
        self.options.sortable_columns = columns;
        let allow = &self.options.sortable_columns;
        let pruned = self
            .rules
            .retain_columns(|column| allow.as_ref().map_or(true, |list| list.iter().any(|c| c == column)));
        if pruned {
            log::debug!("dropped sort rules outside the sortable allow-list");
            self.run_from(Stage::Sort);
        }
    }

    pub fn is_sortable(&self, column: &str) -> bool {
        match &self.options.sortable_columns {
            Some(list) => list.iter().any(|c| c == column),
            None => true,
        }
    }

    // ===== Sorting =====

    /// Sets, updates or removes (`direction: None`) the sort rule for
    /// `column`. Returns whether the rules changed; requests on columns
    /// outside the allow-list are ignored.
    pub fn sort_by(&mut self, column: &str, direction: Option<SortDir>) -> Result<bool, TableError> {
        self.require_source()?;
        if !self.is_sortable(column) {
            log::warn!("column '{column}' is not sortable; ignoring sort request");
            return Ok(false);
        }
        if !self.rules.set_rule(column, direction) {
            return Ok(false);
        }
        log::debug!("sort rule for '{column}' set to {direction:?}");
        self.events.push(TableEvent::Sort {
            column: column.to_string(),
            direction,
        });
        self.run_from(Stage::Sort);
        Ok(true)
    }

    /// Cycles the column through ascending, descending and unsorted.
    pub fn toggle_sort(&mut self, column: &str) -> Result<Option<SortDir>, TableError> {
        let next = match self.rules.direction(column) {
            None => Some(SortDir::Asc),
            Some(SortDir::Asc) => Some(SortDir::Desc),
            Some(SortDir::Desc) => None,
        };
        self.sort_by(column, next)?;
        Ok(self.rules.direction(column))
    }

    /// Removes every sort rule, restoring source order.
    pub fn clear_sort(&mut self) -> Result<bool, TableError> {
        self.require_source()?;
        let removed: Vec<String> = self.rules.rules().iter().map(|r| r.column.clone()).collect();
        if !self.rules.clear() {
            return Ok(false);
        }
        for column in removed {
            self.events.push(TableEvent::Sort {
                column,
                direction: None,
            });
        }
        self.run_from(Stage::Sort);
        Ok(true)
    }

    pub fn sort_rules(&self) -> &SortRules {
        &self.rules
    }

    // ===== Selection =====

    /// Selects `record` (or clears the selection with `None`).
    ///
    /// With `options.scroll`, a record outside the visible rows is scrolled
    /// to the centre of the viewport. Returns whether the selection changed.
    pub fn select(&mut self, record: Option<Record>, options: SelectOptions) -> Result<bool, TableError> {
        self.require_source()?;
        let changed = self.selection.select(record.clone());
        if changed {
            self.events.push(TableEvent::Select {
                record: record.clone(),
                secondary: false,
            });
        }
        if let (Some(record), true) = (&record, options.scroll) {
            self.scroll_into_view(record);
        }
        self.selection.annotate(&mut self.rows);
        Ok(changed)
    }

    pub fn selection(&self) -> Option<&Record> {
        self.selection.get()
    }

    /// Delivers a pointer interaction on a rendered row.
    ///
    /// Returns false for unknown (evicted) shells.
    pub fn handle_row_event(&mut self, shell: ShellId, event: RowEvent) -> bool {
        let record = match self.materializer.shell(shell) {
            Some(shell) if shell.handles(event) => Rc::clone(shell.record()),
            _ => return false,
        };
        self.selection.select(Some(Rc::clone(&record)));
        self.selection.annotate(&mut self.rows);
        self.events.push(TableEvent::Select {
            record: Some(record),
            secondary: event == RowEvent::SecondaryActivate,
        });
        true
    }

    fn scroll_into_view(&mut self, record: &Record) {
        let Some(index) = self.position_of(record) else {
            return;
        };
        let (first, last) = self.window_request().visible_range();
        if index >= first && index < last {
            return;
        }
        let offset = recenter_offset(index, self.ordered.len(), self.options.row_height, self.layout.height());
        log::debug!("recentering on row {index} (offset {offset:.1})");
        self.scroll_offset = offset;
        self.scroll_request = Some(offset);
        if self.rewindow() {
            self.render();
        }
    }

    // ===== Refresh and Live Sync =====

    /// Re-reads the source and re-runs the whole pipeline. `force` also
    /// discards the memoized window so it is recomputed unconditionally.
    pub fn refresh(&mut self, force: bool) -> Result<(), TableError> {
        self.require_source()?;
        if force {
            self.windows.reset();
        }
        self.run_from(Stage::Refresh);
        Ok(())
    }

    /// Collects store notifications and runs the debounced refresh once its
    /// quiet period is over. Returns true if a refresh ran.
    pub fn poll(&mut self) -> bool {
        if self.adapter.is_none() {
            return false;
        }
        self.absorb_changes();
        if !self.debouncer.fire_if_due(self.host.now()) {
            return false;
        }
        log::debug!("store settled; refreshing");
        self.run_from(Stage::Refresh);
        true
    }

    /// When the pending debounced refresh becomes due, if any.
    pub fn next_refresh_deadline(&mut self) -> Option<Instant> {
        self.absorb_changes();
        self.debouncer.deadline()
    }

    fn absorb_changes(&mut self) {
        let Some(adapter) = &self.adapter else {
            return;
        };
        for change in adapter.drain_changes() {
            self.debouncer.trigger(change.at);
        }
    }

    // ===== Scrolling and Layout =====

    /// Reports the host's scroll offset. Returns true if rows were re-rendered.
    pub fn set_scroll_offset(&mut self, offset: f32) -> bool {
        let offset = offset.clamp(0.0, self.max_scroll_offset());
        if offset == self.scroll_offset {
            return false;
        }
        self.scroll_offset = offset;
        self.run_window_stage()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// A scroll position the host should apply (after a recentering select).
    pub fn take_scroll_request(&mut self) -> Option<f32> {
        self.scroll_request.take()
    }

    /// Pins the list height (`Some`) or returns to the natural height
    /// (`None`). Returns the new height if it changed.
    pub fn resize(&mut self, height: Option<f32>) -> Option<f32> {
        let metrics = self.metrics();
        let changed = self.layout.resize(height, &metrics);
        self.after_layout(changed);
        changed
    }

    /// Re-derives the height after the host surface changed size.
    pub fn relayout(&mut self) -> Option<f32> {
        let metrics = self.metrics();
        let changed = self.layout.relayout(&metrics);
        self.after_layout(changed);
        changed
    }

    fn after_layout(&mut self, changed: Option<f32>) {
        let Some(height) = changed else {
            return;
        };
        self.events.push(TableEvent::Resize { height });
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
        self.run_window_stage();
    }

    pub fn height(&self) -> f32 {
        self.layout.height()
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout.mode()
    }

    /// Height of every row stacked.
    pub fn total_height(&self) -> f32 {
        self.ordered.len() as f32 * self.options.row_height
    }

    pub fn page_size(&self) -> usize {
        self.options
            .page_size
            .unwrap_or_else(|| rows_per_viewport(self.layout.height(), self.options.row_height))
    }

    fn max_scroll_offset(&self) -> f32 {
        (self.total_height() - self.layout.height()).max(0.0)
    }

    fn metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            content_height: self.source_order.len() as f32 * self.options.row_height,
            viewport_height: self.host.viewport_height(),
            container_height: self.host.container_height(),
        }
    }

    // ===== Collapse =====

    /// Hides or shows the rows. Returns true if the state changed.
    pub fn collapse(&mut self, collapsed: bool) -> bool {
        if self.collapsed == collapsed {
            return false;
        }
        self.collapsed = collapsed;
        self.events.push(TableEvent::Collapse { collapsed });
        if self.adapter.is_some() {
            self.render();
        }
        true
    }

    pub fn toggle_collapse(&mut self) -> bool {
        let collapsed = !self.collapsed;
        self.collapse(collapsed);
        collapsed
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    // ===== Queries =====

    pub fn ordered_index(&self) -> &[Record] {
        &self.ordered
    }

    pub fn position_of(&self, record: &Record) -> Option<usize> {
        let key = record.key();
        self.ordered.iter().position(|r| r.key() == key)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn window(&self) -> Window {
        self.window
    }

    /// Rows of the current window, selection marks applied.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// First record, in display order, whose text in any column contains
    /// `query` (case-insensitive).
    pub fn find(&self, query: &str) -> Option<Record> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.ordered
            .iter()
            .find(|record| {
                self.columns
                    .iter()
                    .any(|column| self.hooks.searchable_text(record, column).to_lowercase().contains(&needle))
            })
            .cloned()
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Shells created so far; flat while the same rows are re-rendered.
    pub fn shells_built(&self) -> u64 {
        self.materializer.shells_built()
    }

    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    fn require_source(&self) -> Result<(), TableError> {
        if self.adapter.is_some() {
            Ok(())
        } else {
            Err(TableError::NoSource)
        }
    }

    // ===== Pipeline =====

    fn run_from(&mut self, stage: Stage) {
        if self.adapter.is_none() {
            return;
        }
        if stage <= Stage::Refresh {
            self.reload();
        }
        if stage <= Stage::Sort {
            self.resort();
        }
        let moved = self.rewindow();
        if moved || stage < Stage::Window {
            self.render();
        }
    }

    /// Window stage alone; renders only if the window moved.
    fn run_window_stage(&mut self) -> bool {
        if self.adapter.is_none() {
            return false;
        }
        let moved = self.rewindow();
        if moved {
            self.render();
        }
        moved
    }

    fn reload(&mut self) {
        let Some(adapter) = &self.adapter else {
            return;
        };
        // The refresh reads current contents, so queued notifications are subsumed.
        adapter.drain_changes();
        self.debouncer.cancel();

        let records = adapter.list();
        self.columns = self.hooks.resolve_columns(
            &records,
            self.options.columns.as_deref(),
            self.options.column_sample_cap,
        );

        let present: HashSet<FeatureKey> = records.iter().map(|r| r.key()).collect();
        if self.selection.retain_present(&present) {
            log::debug!("selected record left the store");
            self.events.push(TableEvent::Select {
                record: None,
                secondary: false,
            });
        }

        self.source_order = records;
        self.stats.refreshes += 1;
        log::debug!(
            "refreshed {} records, columns {:?}",
            self.source_order.len(),
            column_names(&self.columns)
        );
        self.relayout();
    }

    fn resort(&mut self) {
        let hooks = &self.hooks;
        let cmp = |column: &str, a: Option<&Value>, b: Option<&Value>| hooks.compare_values(column, a, b);
        self.ordered = sort_records(self.source_order.clone(), &self.rules, &cmp);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
        self.stats.sorts += 1;
        log::debug!("sorted {} records by {} rule(s)", self.ordered.len(), self.rules.rules().len());
    }

    fn window_request(&self) -> WindowRequest {
        WindowRequest {
            len: self.ordered.len(),
            scroll_offset: self.scroll_offset,
            row_height: self.options.row_height,
            viewport_height: self.layout.height(),
            page_size: self.page_size(),
        }
    }

    fn rewindow(&mut self) -> bool {
        let request = self.window_request();
        let (window, moved) = self.windows.compute_window(&request);
        self.window = window;
        self.stats.window_recomputes = self.windows.recomputes();
        moved
    }

    /// Materializes the rows of the current window.
    ///
    /// Windowed records that already left the source are skipped while a
    /// refresh is pending, and always for stores whose removals are silent.
    /// Only the windowed keys are checked.
    fn render(&mut self) {
        self.absorb_changes();
        self.stats.renders += 1;
        if self.collapsed {
            self.rows.clear();
            self.materializer.clear();
            return;
        }

        // Records removed since the last refresh are still in the ordered index.
        let end = self.window.end.min(self.ordered.len());
        let windowed = &self.ordered[self.window.start.min(end)..end];
        let live = match &self.adapter {
            Some(adapter) if self.debouncer.is_pending() || adapter.removes_silently() => {
                Some(adapter.present_keys(windowed.iter().map(|r| r.key())))
            }
            _ => None,
        };

        let mut rows = Vec::with_capacity(end.saturating_sub(self.window.start));
        for index in self.window.start..end {
            let record = &self.ordered[index];
            if let Some(live) = &live {
                if !live.contains(&record.key()) {
                    log::debug!("skipping row {index}: record {} was removed", record.key());
                    continue;
                }
            }
            rows.push(self.materializer.materialize(index, record, &self.columns, &self.hooks));
        }

        let keep: HashSet<FeatureKey> = rows.iter().map(Row::key).collect();
        self.materializer.evict_except(&keep);
        self.selection.annotate(&mut rows);
        self.rows = rows;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Feature;
    use crate::host::ManualHost;
    use crate::source::VectorSource;
    use serde_json::json;

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Feature::from_json(json!({"id": i, "name": format!("n{:04}", n - i)})))
            .collect()
    }

    fn table(viewport: f32) -> (Rc<ManualHost>, FeatureTable) {
        let host = Rc::new(ManualHost::new(viewport));
        let table = FeatureTable::new(host.clone(), TableOptions::default());
        (host, table)
    }

    #[test]
    fn test_unbound_data_operations_fail() {
        let (_, mut t) = table(500.0);
        assert!(matches!(t.sort_by("name", Some(SortDir::Asc)), Err(TableError::NoSource)));
        assert!(matches!(t.select(None, SelectOptions::default()), Err(TableError::NoSource)));
        assert!(matches!(t.refresh(false), Err(TableError::NoSource)));
        assert!(!t.poll());
        // Configuration works without a source.
        t.set_columns(vec!["name".into()]);
        assert!(!t.collapse(false));
    }

    #[test]
    fn test_toggle_sort_cycles() {
        let (_, mut t) = table(500.0);
        t.set_records(RecordSource::from_vec(records(5)));
        assert_eq!(t.toggle_sort("name").unwrap(), Some(SortDir::Asc));
        assert_eq!(t.ordered_index()[0].get("id"), Some(json!(4)));
        assert_eq!(t.toggle_sort("name").unwrap(), Some(SortDir::Desc));
        assert_eq!(t.ordered_index()[0].get("id"), Some(json!(0)));
        assert_eq!(t.toggle_sort("name").unwrap(), None);
        assert_eq!(t.ordered_index()[0].get("id"), Some(json!(0)));
        assert!(t.sort_rules().is_empty());
    }

    #[test]
    fn test_unsortable_column_is_ignored() {
        let host = Rc::new(ManualHost::new(500.0));
        let options = TableOptions {
            sortable_columns: Some(vec!["id".into()]),
            ..TableOptions::default()
        };
        let mut t = FeatureTable::new(host, options);
        t.set_records(RecordSource::from_vec(records(5)));
        t.drain_events();

        assert!(!t.sort_by("name", Some(SortDir::Asc)).unwrap());
        assert!(t.sort_rules().is_empty());
        assert!(t.drain_events().is_empty());
    }

    #[test]
    fn test_narrowing_allow_list_drops_rules() {
        let (_, mut t) = table(500.0);
        t.set_records(RecordSource::from_vec(records(5)));
        t.sort_by("name", Some(SortDir::Asc)).unwrap();
        t.set_sortable_columns(Some(vec!["id".into()]));
        assert!(t.sort_rules().is_empty());
        assert_eq!(t.ordered_index()[0].get("id"), Some(json!(0)));
    }

    #[test]
    fn test_scroll_within_page_does_not_render() {
        let (_, mut t) = table(220.0);
        t.set_records(RecordSource::from_vec(records(1000)));
        let renders = t.stats().renders;
        assert!(!t.set_scroll_offset(22.0 * 3.0));
        assert_eq!(t.stats().renders, renders);
        assert!(t.set_scroll_offset(22.0 * 500.0));
        assert_eq!(t.stats().renders, renders + 1);
        assert!(t.window().contains(500));
    }

    #[test]
    fn test_resize_never_resorts() {
        let (_, mut t) = table(1000.0);
        t.set_records(RecordSource::from_vec(records(1000)));
        t.sort_by("name", Some(SortDir::Asc)).unwrap();
        let sorts = t.stats().sorts;
        assert_eq!(t.resize(Some(300.0)), Some(300.0));
        assert_eq!(t.resize(Some(300.0)), None);
        assert_eq!(t.stats().sorts, sorts);
        assert_eq!(t.layout_mode(), LayoutMode::Fixed(300.0));
    }

    #[test]
    fn test_row_event_selects_with_secondary_flag() {
        let (_, mut t) = table(500.0);
        t.set_records(RecordSource::from_vec(records(3)));
        t.drain_events();
        let shell = t.rows()[1].shell;

        assert!(t.handle_row_event(shell, RowEvent::SecondaryActivate));
        let events = t.drain_events();
        assert!(matches!(
            events.as_slice(),
            [TableEvent::Select { record: Some(_), secondary: true }]
        ));
        assert!(t.rows()[1].selected);
        assert!(!t.handle_row_event(ShellId::default(), RowEvent::Activate));
    }

    #[test]
    fn test_removed_selection_is_cleared_on_refresh() {
        let (host, mut t) = table(500.0);
        let store = Rc::new(VectorSource::new());
        store.add_features(records(3));
        t.set_records(Rc::clone(&store));
        let target = Rc::clone(&t.ordered_index()[1]);
        t.select(Some(Rc::clone(&target)), SelectOptions::default()).unwrap();
        t.drain_events();

        store.remove_feature(&target);
        store.add_features(Vec::new());
        host.advance_ms(150);
        assert!(t.poll());
        assert!(t.selection().is_none());
        assert!(matches!(
            t.drain_events().as_slice(),
            [TableEvent::Select { record: None, .. }]
        ));
    }

    #[test]
    fn test_silently_removed_record_is_not_rendered() {
        let (_, mut t) = table(500.0);
        let store = Rc::new(VectorSource::new());
        store.add_features(records(5));
        t.set_records(Rc::clone(&store));
        let gone = Rc::clone(&t.ordered_index()[2]);
        let shell = t.rows()[2].shell;

        store.remove_feature(&gone);
        t.collapse(true);
        t.collapse(false);
        assert_eq!(t.ordered_index().len(), 5);
        assert_eq!(t.rows().len(), 4);
        assert!(t.rows().iter().all(|row| row.key() != gone.key()));
        assert!(!t.handle_row_event(shell, RowEvent::Activate));
    }

    #[test]
    fn test_select_with_scroll_recenters_on_record() {
        let (_, mut t) = table(500.0);
        t.set_records(RecordSource::from_vec(records(1000)));
        assert!(!t.window().contains(800));
        let target = Rc::clone(&t.ordered_index()[800]);

        assert!(t.select(Some(target), SelectOptions { scroll: true }).unwrap());
        let expected = recenter_offset(800, 1000, t.options().row_height, t.height());
        assert!(t.window().contains(800));
        assert_eq!(t.scroll_offset(), expected);
        assert_eq!(t.take_scroll_request(), Some(expected));
        assert_eq!(t.take_scroll_request(), None);
        assert!(t.rows().iter().any(|row| row.index == 800 && row.selected));
    }

    #[test]
    fn test_select_without_scroll_keeps_window() {
        let (_, mut t) = table(500.0);
        t.set_records(RecordSource::from_vec(records(1000)));
        let window = t.window();
        let target = Rc::clone(&t.ordered_index()[800]);

        assert!(t.select(Some(Rc::clone(&target)), SelectOptions { scroll: false }).unwrap());
        assert_eq!(t.window(), window);
        assert_eq!(t.scroll_offset(), 0.0);
        assert_eq!(t.take_scroll_request(), None);
        assert_eq!(t.selection().map(|r| r.key()), Some(target.key()));
    }

    #[test]
    fn test_growing_past_two_pages_renders_whole_list() {
        let (_, mut t) = table(1000.0);
        t.resize(Some(220.0));
        t.set_records(RecordSource::from_vec(records(30)));
        assert_eq!((t.window().start, t.window().end), (0, 20));

        t.resize(Some(330.0));
        t.set_scroll_offset(t.total_height() - t.height());
        let indices: Vec<usize> = t.rows().iter().map(|row| row.index).collect();
        assert_eq!(indices, (0..30).collect::<Vec<_>>());
        assert_eq!(t.window().trailing_spacer, 0.0);
    }

    #[test]
    fn test_collapse_hides_rows_and_keeps_state() {
        let (_, mut t) = table(500.0);
        t.set_records(RecordSource::from_vec(records(10)));
        assert!(t.collapse(true));
        assert!(t.rows().is_empty());
        assert_eq!(t.ordered_index().len(), 10);
        assert!(!t.toggle_collapse());
        assert_eq!(t.rows().len(), 10);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let (_, mut t) = table(500.0);
        t.set_records(RecordSource::from_vec(records(10)));
        let hit = t.find("N0003").unwrap();
        assert_eq!(hit.get("id"), Some(json!(7)));
        assert!(t.find("   ").is_none());
    }
}
