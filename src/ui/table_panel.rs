//! Table panel UI rendering
//!
//! Hosts the feature table: header, the windowed list with spacers standing
//! in for rows outside the window, and a drag handle for the list height.

use crate::app::AppState;
use crate::rendering::row_renderer;
use crate::ui::table_header::{self, TableHeaderInteraction, HEADER_HEIGHT};
use crate::utils::format_count;
use eframe::egui;
use egui::ScrollArea;
use rlayertable::{RowEvent, ShellId};
use std::path::Path;

/// Height of the resize handle under the list
pub const HANDLE_HEIGHT: f32 = 8.0;

/// Result of table panel interactions that need to be handled by the application.
pub enum TablePanelInteraction {
    /// A column header was clicked
    SortToggled(String),
    /// A row was clicked
    RowActivated { shell: ShellId, event: RowEvent },
    /// The resize handle was dragged (`Some`) or double-clicked (`None`)
    Resized(Option<f32>),
}

/// Renders the table panel with its header, windowed rows and height handle
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
/// * `loading` - Path of the file being loaded in the background, if any
///
/// # Returns
/// * `Option<TablePanelInteraction>` - User interaction result
pub fn render_table_panel(ui: &mut egui::Ui, state: &mut AppState, loading: Option<&Path>) -> Option<TablePanelInteraction> {
    if let Some(path) = loading {
        ui.horizontal(|ui| {
            ui.spinner();
            let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            ui.label(format!("Loading {name}…"));
        });
    }

    if state.table.is_collapsed() {
        ui.label(format!("{} features (collapsed)", format_count(state.table.ordered_index().len())));
        return None;
    }

    let columns: Vec<String> = state.table.columns().iter().map(|c| c.name.clone()).collect();
    if columns.is_empty() {
        ui.label("No features to display");
        return None;
    }

    // Offer the rest of the panel to the list.
    let offered = (ui.available_height() - HEADER_HEIGHT - HANDLE_HEIGHT - 8.0).max(0.0);
    if state.host.set_container_height(Some(offered)) {
        state.table.relayout();
    }

    let mut interaction = None;

    ScrollArea::horizontal().id_salt("table_hscroll").show(ui, |ui| {
        let header_interaction = table_header::render_table_header(
            ui,
            &mut state.layout,
            &columns,
            state.table.sort_rules(),
            |column| state.table.is_sortable(column),
        );
        if let Some(TableHeaderInteraction::SortToggled(column)) = header_interaction {
            interaction = Some(TablePanelInteraction::SortToggled(column));
        }

        let height = state.table.height();
        let mut scroll_area = ScrollArea::vertical()
            .id_salt("table_scroll")
            .max_height(height)
            .min_scrolled_height(height)
            .auto_shrink([false, false]);
        if let Some(offset) = state.table.take_scroll_request() {
            scroll_area = scroll_area.vertical_scroll_offset(offset);
        }

        let output = scroll_area.show(ui, |ui| {
            ui.spacing_mut().item_spacing.y = 0.0;
            let window = state.table.window();

            if window.leading_spacer > 0.0 {
                ui.add_space(window.leading_spacer);
            }

            for row in state.table.rows() {
                if let Some(event) = row_renderer::render_row(ui, row, &columns, &state.layout) {
                    interaction = Some(TablePanelInteraction::RowActivated { shell: row.shell, event });
                }
            }

            if window.trailing_spacer > 0.0 {
                ui.add_space(window.trailing_spacer);
            }
        });

        if state.table.set_scroll_offset(output.state.offset.y) {
            // The window moved; show the new rows next frame.
            ui.ctx().request_repaint();
        }

        if let Some(resize) = render_resize_handle(ui, height) {
            interaction = Some(resize);
        }
    });

    interaction
}

fn render_resize_handle(ui: &mut egui::Ui, height: f32) -> Option<TablePanelInteraction> {
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), HANDLE_HEIGHT),
        egui::Sense::click_and_drag(),
    );

    let active = response.hovered() || response.dragged();
    if active {
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeVertical);
    }
    let color = if active {
        egui::Color32::from_rgb(100, 150, 255)
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke.color
    };
    ui.painter().line_segment(
        [rect.left_center(), rect.right_center()],
        egui::Stroke::new(if active { 3.0 } else { 1.0 }, color),
    );

    if response.double_clicked() {
        return Some(TablePanelInteraction::Resized(None));
    }
    if response.dragged() {
        let delta = response.drag_delta().y;
        if delta != 0.0 {
            return Some(TablePanelInteraction::Resized(Some(height + delta)));
        }
    }
    None
}
