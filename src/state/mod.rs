//! State management modules for the layer table viewer.
//!
//! This module contains state-only logic (no UI concerns):
//! - Store state (live feature store, origin, synthetic data)
//! - Search state (query buffer, last outcome)
//! - Layout state (column widths, panel split)

mod store_state;
mod search_state;
mod layout_state;

pub use store_state::{StoreOrigin, StoreState};
pub use search_state::SearchState;
pub use layout_state::LayoutState;
