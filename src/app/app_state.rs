//! Centralized application state for the layer table viewer.
//!
//! Composes focused state components, each owning one aspect of the
//! application, around the [`FeatureTable`] that mirrors the live store.

use crate::state::{LayoutState, SearchState, StoreState};
use rlayertable::{FeatureTable, SourceCapabilities, SystemHost, TableOptions};
use std::rc::Rc;

/// Main application state composed of focused state components.
pub struct AppState {
    // ===== Focused State Components =====
    /// Live feature store and where its contents came from
    pub store: StoreState,

    /// The table bound to the store
    pub table: FeatureTable,

    /// Window metrics the table negotiates its height against
    pub host: Rc<SystemHost>,

    /// Search box state
    pub search: SearchState,

    /// UI layout state
    pub layout: LayoutState,

    // ===== Top-Level State =====
    /// Current error message to display (if any)
    pub error_message: Option<String>,

    /// Short description of the last table notification, for the status bar
    pub last_event: Option<String>,

    capabilities: SourceCapabilities,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TableOptions::default(), LayoutState::new())
    }
}

impl AppState {
    /// Creates the state with persisted options and layout, the table bound
    /// to an empty store.
    pub fn new(options: TableOptions, layout: LayoutState) -> Self {
        let host = Rc::new(SystemHost::new(0.0));
        let store = StoreState::new();
        let mut table = FeatureTable::new(host.clone(), options);
        let capabilities = table.set_records(Rc::clone(store.store()));

        Self {
            store,
            table,
            host,
            search: SearchState::new(),
            layout,
            error_message: None,
            last_event: None,
            capabilities,
        }
    }

    /// Capabilities of the store the table is bound to.
    pub fn capabilities(&self) -> SourceCapabilities {
        self.capabilities
    }

    /// Options worth persisting: the configured options plus the current
    /// collapse state.
    pub fn persisted_options(&self) -> TableOptions {
        TableOptions {
            collapsed: self.table.is_collapsed(),
            ..self.table.options().clone()
        }
    }
}
