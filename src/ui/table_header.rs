//! Table header component rendering
//!
//! Column labels with sort arrows and drag handles for resizing columns.

use crate::rendering::text_utils::{truncate_text_to_fit, CELL_PADDING};
use crate::state::LayoutState;
use eframe::egui;
use egui::Color32;
use rlayertable::SortRules;

/// Height of the header row in pixels
pub const HEADER_HEIGHT: f32 = 24.0;

const HANDLE_WIDTH: f32 = 8.0;

/// Result of user interaction with the header
pub enum TableHeaderInteraction {
    /// A column label was clicked
    SortToggled(String),
}

/// Renders the column headers.
///
/// Labels of sortable columns are clickable and show the sort direction plus
/// the rule's precedence when more than one rule is active.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `layout` - Column widths, updated when a handle is dragged
/// * `columns` - Displayed column names, in order
/// * `rules` - Active sort rules
/// * `is_sortable` - Whether a column accepts sort requests
///
/// # Returns
/// * `Option<TableHeaderInteraction>` - User interaction result
pub fn render_table_header(
    ui: &mut egui::Ui,
    layout: &mut LayoutState,
    columns: &[String],
    rules: &SortRules,
    is_sortable: impl Fn(&str) -> bool,
) -> Option<TableHeaderInteraction> {
    let mut interaction = None;
    let start_pos = ui.cursor().min;
    let total_width = layout.row_width(columns.iter().map(String::as_str));

    ui.allocate_exact_size(
        egui::vec2(total_width.max(ui.available_width()), HEADER_HEIGHT),
        egui::Sense::hover(),
    );

    let font_id = egui::FontId::proportional(14.0);
    let mut x_offset = 0.0;

    for (i, column) in columns.iter().enumerate() {
        let width = layout.column_width(column);
        let label_rect = egui::Rect::from_min_size(
            egui::pos2(start_pos.x + x_offset, start_pos.y),
            egui::vec2(width, HEADER_HEIGHT),
        );

        let sortable = is_sortable(column);
        let label_response = ui.interact(
            label_rect.shrink2(egui::vec2(HANDLE_WIDTH / 2.0, 0.0)),
            ui.id().with(("header_label", i)),
            if sortable { egui::Sense::click() } else { egui::Sense::hover() },
        );
        if sortable && label_response.clicked() {
            interaction = Some(TableHeaderInteraction::SortToggled(column.clone()));
        }
        if sortable && label_response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        let mut label = column.clone();
        if let Some(position) = rules.rules().iter().position(|r| &r.column == column) {
            let rule = &rules.rules()[position];
            label.push(' ');
            label.push_str(rule.dir.arrow());
            if rules.rules().len() > 1 {
                label.push_str(&(position + 1).to_string());
            }
        }

        let painter = ui.painter();
        let text = truncate_text_to_fit(&label, width, &font_id, painter);
        painter.text(
            label_rect.left_center() + egui::vec2(CELL_PADDING / 2.0, 0.0),
            egui::Align2::LEFT_CENTER,
            &text,
            font_id.clone(),
            ui.visuals().strong_text_color(),
        );

        x_offset += width;

        // Resize handle on the right edge of the column
        let handle_rect = egui::Rect::from_center_size(
            egui::pos2(start_pos.x + x_offset, start_pos.y + HEADER_HEIGHT / 2.0),
            egui::vec2(HANDLE_WIDTH, HEADER_HEIGHT),
        );
        let handle_response = ui.interact(handle_rect, ui.id().with(("header_resize", i)), egui::Sense::click_and_drag());

        if handle_response.double_clicked() {
            layout.reset_column_widths();
        } else if handle_response.dragged() {
            layout.resize_column(column, handle_response.drag_delta().x);
        }

        let color = if handle_response.hovered() || handle_response.dragged() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
            Color32::from_rgb(100, 150, 255)
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke.color.gamma_multiply(0.5)
        };
        ui.painter().rect_filled(handle_rect.shrink(2.0), 0.0, color);
    }

    interaction
}
