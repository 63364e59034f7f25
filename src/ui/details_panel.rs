//! Details panel UI rendering
//!
//! Shows every property of the selected feature, including ones the table
//! has no column for.

use eframe::egui;
use egui::{Color32, RichText, ScrollArea};
use crate::app::AppState;
use rlayertable::GEOMETRY_PROPERTY;
use serde_json::Value;

/// Renders the details panel showing every property of the selected feature
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
pub fn render_details_panel(ui: &mut egui::Ui, state: &AppState) {
    let Some(record) = state.table.selection() else {
        ui.label("Properties (select a feature to view)");
        return;
    };

    let title = match record.get("name") {
        Some(Value::String(name)) => name,
        _ => format!("feature {}", record.key()),
    };
    ui.label(RichText::new(format!("Details for: {title}")).strong());
    if let Some(position) = state.table.position_of(record) {
        ui.label(RichText::new(format!("Row {}", position + 1)).weak());
    }
    ui.separator();

    let available_height = ui.available_height();
    ScrollArea::vertical()
        .id_salt("details_scroll_area")
        .max_height(available_height)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let properties = record.properties();
            if properties.is_empty() {
                ui.colored_label(Color32::GRAY, "(no properties)");
                return;
            }

            egui::Grid::new("details_grid").striped(true).num_columns(2).show(ui, |ui| {
                for (key, value) in properties.iter() {
                    ui.label(RichText::new(key).strong());
                    if key == GEOMETRY_PROPERTY {
                        ui.label(RichText::new(geometry_summary(value)).monospace());
                    } else {
                        match value {
                            Value::Null => ui.colored_label(Color32::GRAY, "null"),
                            Value::String(s) => ui.label(s),
                            other => ui.label(RichText::new(other.to_string()).monospace()),
                        };
                    }
                    ui.end_row();
                }
            });
        });
}

/// One-line description of a GeoJSON geometry.
fn geometry_summary(geometry: &Value) -> String {
    let kind = geometry.get("type").and_then(Value::as_str).unwrap_or("Geometry");
    match (kind, geometry.get("coordinates")) {
        ("Point", Some(Value::Array(coords))) => {
            let parts: Vec<String> = coords.iter().map(|c| c.to_string()).collect();
            format!("Point({})", parts.join(", "))
        }
        (_, Some(Value::Array(coords))) => format!("{kind} [{} parts]", coords.len()),
        _ => kind.to_string(),
    }
}
