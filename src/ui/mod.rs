//! UI panel rendering subsystem
//!
//! This module contains all UI panel rendering logic for the layer table viewer:
//! - Header panel (file controls, store edits, search)
//! - Table panel (windowed feature list with a height handle)
//! - Table header component (sortable, resizable column headers)
//! - Details panel (properties of the selected feature)
//! - Status bar (store and table metadata)
//! - Panel manager (panel orchestration and layout)

pub mod header;
pub mod table_panel;
pub mod table_header;
pub mod details_panel;
pub mod status_bar;
pub mod panel_manager;
