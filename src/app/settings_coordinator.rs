//! Settings persistence coordination.
//!
//! Stores table options, table height and layout between sessions as JSON
//! strings in eframe's persistent storage.

use crate::app::AppState;
use crate::state::LayoutState;
use rlayertable::{LayoutMode, TableOptions};
use serde::{Deserialize, Serialize};

const TABLE_OPTIONS_KEY: &str = "table_options";
const TABLE_HEIGHT_KEY: &str = "table_height";
const LAYOUT_KEY: &str = "table_layout";

/// Settings restored at startup.
pub struct RestoredSettings {
    pub options: TableOptions,
    pub layout: LayoutState,
    /// Pinned table height, if the user dragged one
    pub height: Option<f32>,
}

/// Coordinates settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Loads everything the viewer persists, falling back to defaults for
    /// missing or unreadable entries.
    pub fn restore(storage: Option<&dyn eframe::Storage>) -> RestoredSettings {
        let options: TableOptions = Self::load_setting(storage, TABLE_OPTIONS_KEY);
        RestoredSettings {
            options: options.sanitized(),
            layout: Self::load_setting(storage, LAYOUT_KEY),
            height: Self::try_load_setting::<Option<f32>>(storage, TABLE_HEIGHT_KEY).flatten(),
        }
    }

    /// Saves the current options, pinned height and layout.
    pub fn persist(storage: &mut dyn eframe::Storage, state: &AppState) {
        let height = match state.table.layout_mode() {
            LayoutMode::Fixed(h) => Some(h),
            LayoutMode::Natural => None,
        };
        Self::save_setting(storage, TABLE_OPTIONS_KEY, &state.persisted_options());
        Self::save_setting(storage, TABLE_HEIGHT_KEY, &height);
        Self::save_setting(storage, LAYOUT_KEY, &state.layout);
    }

    /// Loads a setting, or `T::default()` if absent or invalid.
    pub fn load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> T
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        Self::try_load_setting(storage, key).unwrap_or_default()
    }

    /// Attempts to load a setting, returning None if not found or invalid.
    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let json_str = storage?.get_string(key)?;
        match serde_json::from_str(&json_str) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("ignoring stored setting '{key}': {e}");
                None
            }
        }
    }

    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        if let Ok(json_str) = serde_json::to_string(value) {
            storage.set_string(key, json_str);
        }
    }
}
