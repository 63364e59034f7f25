//! Text rendering utilities
//!
//! Shared helpers for measuring and fitting cell text.

use eframe::egui;

/// Horizontal padding inside a cell, split evenly between both sides
pub const CELL_PADDING: f32 = 8.0;

const ELLIPSIS: &str = "…";

/// Width of `text` laid out on a single line.
pub fn text_width(text: &str, font_id: &egui::FontId, painter: &egui::Painter) -> f32 {
    painter
        .layout_no_wrap(text.to_string(), font_id.clone(), egui::Color32::WHITE)
        .size()
        .x
}

/// Shortens `text` with a trailing ellipsis so it fits in a cell of
/// `cell_width`. Returns an empty string when not even the ellipsis fits.
pub fn truncate_text_to_fit(
    text: &str,
    cell_width: f32,
    font_id: &egui::FontId,
    painter: &egui::Painter,
) -> String {
    let max_width = cell_width - CELL_PADDING;
    if max_width <= 0.0 {
        return String::new();
    }
    if text_width(text, font_id, painter) <= max_width {
        return text.to_string();
    }

    let room = max_width - text_width(ELLIPSIS, font_id, painter);
    if room <= 0.0 {
        return String::new();
    }

    // Largest prefix (in chars) that fits; prefix width grows monotonically.
    let chars: Vec<char> = text.chars().collect();
    let (mut low, mut high) = (0usize, chars.len());
    while low < high {
        let mid = (low + high + 1) / 2;
        let prefix: String = chars[..mid].iter().collect();
        if text_width(&prefix, font_id, painter) <= room {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    let mut fitted: String = chars[..low].iter().collect();
    fitted.push_str(ELLIPSIS);
    fitted
}
