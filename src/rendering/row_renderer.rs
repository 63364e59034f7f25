//! Table row rendering
//!
//! Paints one materialized row: background (selection, stripe, hover) and
//! one clipped text cell per column.

use crate::rendering::text_utils::{truncate_text_to_fit, CELL_PADDING};
use crate::state::LayoutState;
use eframe::egui;
use rlayertable::hooks::MISSING_PLACEHOLDER;
use rlayertable::{Row, RowEvent, ROW_HEIGHT};

/// Font size of cell text
pub const CELL_FONT_SIZE: f32 = 13.0;

/// Renders a row and reports a primary or secondary click on it.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `row` - Materialized row with cell texts and selection mark
/// * `columns` - Displayed column names, matching `row.cells`
/// * `layout` - Column widths
///
/// # Returns
/// * `Option<RowEvent>` - The click on this row, if any
pub fn render_row(ui: &mut egui::Ui, row: &Row, columns: &[String], layout: &LayoutState) -> Option<RowEvent> {
    let row_width = layout.row_width(columns.iter().map(String::as_str));
    let (row_rect, response) = ui.allocate_exact_size(
        egui::vec2(row_width.max(ui.available_width()), ROW_HEIGHT),
        egui::Sense::click(),
    );

    let visuals = ui.visuals();
    let background = if row.selected {
        Some(visuals.selection.bg_fill)
    } else if response.hovered() {
        Some(visuals.widgets.hovered.weak_bg_fill)
    } else if row.index % 2 == 1 {
        Some(visuals.faint_bg_color)
    } else {
        None
    };
    let text_color = if row.selected {
        visuals.selection.stroke.color
    } else {
        visuals.text_color()
    };
    let weak_color = visuals.weak_text_color();

    let painter = ui.painter();
    if let Some(fill) = background {
        painter.rect_filled(row_rect, 0.0, fill);
    }

    let font_id = egui::FontId::proportional(CELL_FONT_SIZE);
    let mut x = row_rect.min.x;
    for (cell, column) in row.cells.iter().zip(columns) {
        let width = layout.column_width(column);
        let text = truncate_text_to_fit(cell, width, &font_id, painter);
        let color = if cell == MISSING_PLACEHOLDER { weak_color } else { text_color };
        painter.text(
            egui::pos2(x + CELL_PADDING / 2.0, row_rect.center().y),
            egui::Align2::LEFT_CENTER,
            text,
            font_id.clone(),
            color,
        );
        x += width;
    }

    if response.secondary_clicked() {
        Some(RowEvent::SecondaryActivate)
    } else if response.clicked() {
        Some(RowEvent::Activate)
    } else {
        None
    }
}
