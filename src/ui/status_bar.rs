//! Status bar UI rendering
//!
//! Handles the bottom status bar displaying store and table metadata.

use eframe::egui;
use egui::RichText;
use crate::app::AppState;
use crate::state::StoreOrigin;
use crate::utils::{format_count, format_memory_mb, get_current_memory_mb};

/// Renders the status panel at the bottom of the window with store and table metadata
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    ui.horizontal(|ui| {
        // Always show memory usage first
        let memory_text = format_memory_mb(get_current_memory_mb());
        ui.label(RichText::new(&memory_text).strong());
        ui.label(RichText::new("|").strong());

        let origin = match state.store.origin() {
            StoreOrigin::Empty => "No features loaded".to_string(),
            StoreOrigin::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            StoreOrigin::Generated { seed } => format!("Generated | Seed: {seed}"),
        };
        let capabilities = state.capabilities();
        let mode = if capabilities.live { "live" } else { "static" };
        ui.label(RichText::new(format!(
            "{origin} | Features: {} | {mode}",
            format_count(state.table.ordered_index().len())
        )).strong());

        // The store runs ahead of the table while a refresh is pending.
        let stored = state.store.len();
        if stored != state.table.ordered_index().len() {
            ui.label(RichText::new(format!("(store: {})", format_count(stored))).weak());
        }

        let window = state.table.window();
        if !window.is_empty() {
            ui.label(RichText::new("|").strong());
            ui.label(format!("Rows {}..{}", window.start, window.end));
        }

        let rules = state.table.sort_rules().rules();
        if !rules.is_empty() {
            let text: Vec<String> = rules.iter().map(|r| format!("{} {}", r.column, r.dir.arrow())).collect();
            ui.label(RichText::new("|").strong());
            ui.label(format!("Sort: {}", text.join(", ")));
        }

        if let Some(event) = &state.last_event {
            ui.label(RichText::new("|").strong());
            ui.label(RichText::new(event).weak());
        }
    });
}
