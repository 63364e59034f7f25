//! Header panel UI rendering
//!
//! Handles the top bar with file controls, store edits, search and table toggles.

use eframe::egui;
use egui::Color32;
use std::path::PathBuf;
use crate::app::AppState;

/// Number of features produced by the "Generate" button
pub const GENERATE_COUNT: usize = 10_000;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User picked a file in the "Open" dialog
    OpenFileRequested(PathBuf),
    /// User clicked "Generate"
    GenerateRequested(usize),
    AddRandomRequested,
    RemoveRandomRequested,
    RemoveSelectedRequested,
    /// User pressed Enter in the search box
    SearchRequested,
    ClearSortRequested,
    CollapseToggled,
}

/// Renders the application header
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("📁 Open").clicked() {
            let mut dialog = rfd::FileDialog::new()
                .add_filter("All Feature Files", &["geojson", "json", "br"])
                .add_filter("GeoJSON", &["geojson", "json"])
                .add_filter("Compressed GeoJSON", &["br"]);

            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }

            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenFileRequested(path));
            }
        }

        if ui.button("🔮 Generate").on_hover_text(format!("Replace the layer with {GENERATE_COUNT} synthetic features")).clicked() {
            interaction = Some(HeaderInteraction::GenerateRequested(GENERATE_COUNT));
        }

        ui.separator();

        if ui.button("➕").on_hover_text("Add a random feature").clicked() {
            interaction = Some(HeaderInteraction::AddRandomRequested);
        }
        if ui.button("➖").on_hover_text("Remove a random feature").clicked() {
            interaction = Some(HeaderInteraction::RemoveRandomRequested);
        }
        let has_selection = state.table.selection().is_some();
        if ui.add_enabled(has_selection, egui::Button::new("🗑 Selected")).clicked() {
            interaction = Some(HeaderInteraction::RemoveSelectedRequested);
        }

        ui.separator();

        ui.label("Find:");
        let no_match = state.search.no_match();
        let mut edit = egui::TextEdit::singleline(state.search.query_mut()).desired_width(160.0);
        if no_match {
            edit = edit.text_color(Color32::from_rgb(220, 80, 80));
        }
        let response = edit.show(ui).response;
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            interaction = Some(HeaderInteraction::SearchRequested);
        }

        ui.separator();

        let sorted = !state.table.sort_rules().is_empty();
        if ui.add_enabled(sorted, egui::Button::new("Clear sort")).clicked() {
            interaction = Some(HeaderInteraction::ClearSortRequested);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = if state.table.is_collapsed() { "▸ Expand" } else { "▾ Collapse" };
            if ui.button(label).clicked() {
                interaction = Some(HeaderInteraction::CollapseToggled);
            }
        });
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(Color32::RED, err);
    }

    interaction
}
