//! Application-level coordination and workflow management.
//!
//! Handles high-level operations like file loading, store edits, search and
//! table interactions, and turns table notifications into status text.

use crate::app::AppState;
use crate::io::{AsyncLoader, LoadResult};
use rlayertable::{into_records, RowEvent, SelectOptions, ShellId, TableEvent};
use std::path::PathBuf;

/// Coordinates application-level operations and workflows.
///
/// This struct is responsible for:
/// - Managing file loading workflows
/// - Editing the live store (generate, add, remove)
/// - Forwarding UI interactions to the table
/// - Managing error states
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Initiates asynchronous file loading.
    pub fn open_file(state: &mut AppState, loader: &mut AsyncLoader, path: PathBuf, ctx: &egui::Context) {
        state.error_message = None;
        loader.start_file_load(path, ctx);
    }

    /// Checks for loading completion and moves the features into the store.
    ///
    /// Called once per frame.
    ///
    /// # Arguments
    /// * `state` - Mutable reference to application state
    /// * `loader` - The loader to poll
    ///
    /// # Returns
    /// * `bool` - True if a load operation completed
    pub fn check_loading_completion(state: &mut AppState, loader: &mut AsyncLoader) -> bool {
        match loader.check_completion() {
            LoadResult::Success { features, path } => {
                let records = into_records(features);
                log::info!("loaded {} features from {}", records.len(), path.display());
                // The store announces the reload; the table picks it up on its next poll.
                state.store.load_file(records, path);
                state.search.clear();
                state.error_message = None;
                true
            }
            LoadResult::Error(message) => {
                log::error!("loading failed: {message}");
                state.error_message = Some(format!("Error loading features: {message}"));
                true
            }
            LoadResult::None => false,
        }
    }

    /// Replaces the store contents with synthetic features.
    pub fn generate_features(state: &mut AppState, count: usize) {
        state.store.generate(count);
        state.search.clear();
        state.error_message = None;
    }

    pub fn add_random_feature(state: &mut AppState) {
        let record = state.store.add_random();
        log::debug!("added feature {}", record.key());
    }

    /// Removes a random feature and refreshes, since single removals are silent.
    pub fn remove_random_feature(state: &mut AppState) {
        if let Some(record) = state.store.remove_random() {
            log::debug!("removed feature {}", record.key());
            Self::refresh(state);
        }
    }

    pub fn remove_selected_feature(state: &mut AppState) {
        let Some(record) = state.table.selection().cloned() else {
            return;
        };
        if state.store.remove(&record) {
            Self::refresh(state);
        }
    }

    fn refresh(state: &mut AppState) {
        if let Err(e) = state.table.refresh(false) {
            state.error_message = Some(e.to_string());
        }
    }

    /// Selects the first record matching the search box and scrolls to it.
    pub fn handle_search(state: &mut AppState) {
        let hit = state.table.find(state.search.query());
        state.search.record_result(hit.is_some());
        if let Some(record) = hit {
            if let Err(e) = state.table.select(Some(record), SelectOptions { scroll: true }) {
                state.error_message = Some(e.to_string());
            }
        }
    }

    /// Cycles the sort of a column after a header click.
    pub fn handle_sort_toggle(state: &mut AppState, column: &str) {
        if let Err(e) = state.table.toggle_sort(column) {
            state.error_message = Some(e.to_string());
        }
    }

    pub fn handle_clear_sort(state: &mut AppState) {
        if let Err(e) = state.table.clear_sort() {
            state.error_message = Some(e.to_string());
        }
    }

    pub fn handle_row_event(state: &mut AppState, shell: ShellId, event: RowEvent) {
        if !state.table.handle_row_event(shell, event) {
            log::debug!("row event on evicted shell {shell:?}");
        }
    }

    /// Applies a drag on the resize handle (`None` returns to natural height).
    pub fn handle_resize(state: &mut AppState, height: Option<f32>) {
        state.table.resize(height);
    }

    pub fn handle_collapse_toggle(state: &mut AppState) {
        state.table.toggle_collapse();
    }

    /// Drains table notifications into the log and the status bar text.
    pub fn process_table_events(state: &mut AppState) {
        for event in state.table.drain_events() {
            let text = match &event {
                TableEvent::Select { record: Some(record), secondary } => {
                    let name = record.get("name").and_then(|v| v.as_str().map(str::to_owned));
                    let suffix = if *secondary { " (secondary)" } else { "" };
                    format!("selected {}{suffix}", name.unwrap_or_else(|| record.key().to_string()))
                }
                TableEvent::Select { record: None, .. } => "selection cleared".to_string(),
                TableEvent::Sort { column, direction: Some(dir) } => format!("sorted by {column} {}", dir.arrow()),
                TableEvent::Sort { column, direction: None } => format!("unsorted {column}"),
                TableEvent::Resize { height } => format!("height {height:.0}px"),
                TableEvent::Collapse { collapsed: true } => "collapsed".to_string(),
                TableEvent::Collapse { collapsed: false } => "expanded".to_string(),
            };
            log::debug!("table event: {text}");
            state.last_event = Some(text);
        }
    }
}
