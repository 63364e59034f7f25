//! Layer Table Viewer GUI Application
//!
//! This module provides an interactive viewer for vector feature layers using the egui framework.
//! The viewer features:
//! - A sortable, windowed attribute table that follows the live layer
//! - Multi-column sorting from the column headers

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
//! - Asynchronous GeoJSON loading with loading indicators
//! - Synthetic layers and random edits for exercising the live store
//! - Details panel for viewing every property of the selected feature
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state management and coordination
//! - `io/` - Background file loading
//! - `utils/` - Utility functions for formatting
//! - `ui/` - UI panel rendering and interaction
//! - `rendering/` - Low-level rendering for table rows
//! - `state/` - State management for the store, search and layout

use eframe::egui;
use std::path::PathBuf;

mod utils;
mod io;
mod app;
mod rendering;
mod ui;
mod state;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator};
use io::AsyncLoader;
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Main application entry point that initializes and launches the viewer GUI.
fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments to check for initial file to load
    let initial_file = std::env::args()
        .nth(1)
        .map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Layer Table Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "Layer Table Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(LayerTableApp::new(cc, initial_file)))),
    )
}

/// The main viewer application.
///
/// Delegates most functionality to coordinators:
/// - `ApplicationCoordinator` handles file loading, store edits and table interactions
/// - `SettingsCoordinator` handles persistence of table options and layout
/// - `PanelManager` handles UI panel layout and rendering
struct LayerTableApp {
    /// Centralized application state
    state: AppState,
    /// Asynchronous file loader
    loader: AsyncLoader,
    /// Optional file to load on first frame
    pending_file_load: Option<PathBuf>,
}

impl LayerTableApp {
    /// Creates a new viewer instance with settings loaded from persistent storage.
    /// Optionally accepts an initial file path to load on startup.
    fn new(cc: &eframe::CreationContext, initial_file: Option<PathBuf>) -> Self {
        let restored = SettingsCoordinator::restore(cc.storage);
        let mut state = AppState::new(restored.options, restored.layout);
        if let Some(height) = restored.height {
            state.table.resize(Some(height));
            // Restoring is not a user resize.
            state.table.drain_events();
        }

        Self {
            state,
            loader: AsyncLoader::new(),
            pending_file_load: initial_file,
        }
    }

    /// Handles panel interactions by delegating to ApplicationCoordinator.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        let state = &mut self.state;
        match interaction {
            PanelInteraction::OpenFileRequested(path) => {
                ApplicationCoordinator::open_file(state, &mut self.loader, path, ctx);
            }
            PanelInteraction::GenerateRequested(count) => ApplicationCoordinator::generate_features(state, count),
            PanelInteraction::AddRandomRequested => ApplicationCoordinator::add_random_feature(state),
            PanelInteraction::RemoveRandomRequested => ApplicationCoordinator::remove_random_feature(state),
            PanelInteraction::RemoveSelectedRequested => ApplicationCoordinator::remove_selected_feature(state),
            PanelInteraction::SearchRequested => ApplicationCoordinator::handle_search(state),
            PanelInteraction::ClearSortRequested => ApplicationCoordinator::handle_clear_sort(state),
            PanelInteraction::CollapseToggled => ApplicationCoordinator::handle_collapse_toggle(state),
            PanelInteraction::SortToggled(column) => ApplicationCoordinator::handle_sort_toggle(state, &column),
            PanelInteraction::RowActivated { shell, event } => {
                ApplicationCoordinator::handle_row_event(state, shell, event);
            }
            PanelInteraction::TableResized(height) => ApplicationCoordinator::handle_resize(state, height),
        }
        ctx.request_repaint();
    }
}

impl eframe::App for LayerTableApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        SettingsCoordinator::persist(storage, &self.state);
    }

    /// Main update loop that renders all UI panels and handles application state.
    ///
    /// 1. Check for async loading completion
    /// 2. Track the window height and apply pending store changes
    /// 3. Load initial file if specified via command line
    /// 4. Render all panels via PanelManager and handle interactions
    /// 5. Schedule a repaint for the next debounced refresh
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        ApplicationCoordinator::check_loading_completion(&mut self.state, &mut self.loader);

        if self.state.host.set_viewport_height(ctx.content_rect().height()) {
            self.state.table.relayout();
        }

        self.state.table.poll();

        // Load initial file if specified via command line (only on first frame)
        if let Some(path) = self.pending_file_load.take() {
            ApplicationCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
        }

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state, &self.loader) {
            self.handle_panel_interaction(interaction, ctx);
        }

        ApplicationCoordinator::process_table_events(&mut self.state);

        if let Some(deadline) = self.state.table.next_refresh_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(std::time::Instant::now()));
        }

        // Persist preferences during frame (for crash resilience)
        if let Some(storage) = frame.storage_mut() {
            SettingsCoordinator::persist(storage, &self.state);
        }
    }
}
