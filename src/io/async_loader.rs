//! Asynchronous GeoJSON file loading.
//!
//! Files are read and parsed on a background thread so the GUI stays
//! responsive. Parsed features travel back as plain [`FeatureData`]; records
//! are built on the UI thread, which owns the store.

use eframe::egui;
use rlayertable::{read_feature_collection, FeatureData};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;

/// Result of a completed loading operation.
pub enum LoadResult {
    Success {
        features: Vec<FeatureData>,
        path: PathBuf,
    },
    Error(String),
    /// No result yet (still loading or nothing started)
    None,
}

/// Manages asynchronous loading of feature files.
pub struct AsyncLoader {
    /// Set while a background thread is reading
    in_progress: Arc<AtomicBool>,

    /// Channel receiver for loading results
    loading_receiver: Option<Receiver<Result<Vec<FeatureData>, String>>>,

    /// Path of the file currently being loaded
    pending_load_path: Option<PathBuf>,
}

impl AsyncLoader {
    pub fn new() -> Self {
        Self {
            in_progress: Arc::new(AtomicBool::new(false)),
            loading_receiver: None,
            pending_load_path: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    pub fn pending_path(&self) -> Option<&PathBuf> {
        self.pending_load_path.as_ref()
    }

    /// Starts reading `path` in the background.
    ///
    /// Call [`check_completion`](Self::check_completion) once per frame to
    /// pick up the result. A load started while another is running replaces
    /// it; the earlier result is dropped.
    pub fn start_file_load(&mut self, path: PathBuf, ctx: &egui::Context) {
        let (sender, receiver) = channel();
        self.loading_receiver = Some(receiver);
        // Each load gets its own flag so a replaced load cannot clear it.
        self.in_progress = Arc::new(AtomicBool::new(true));
        self.pending_load_path = Some(path.clone());

        let in_progress = Arc::clone(&self.in_progress);
        let ctx_handle = ctx.clone();

        log::info!("loading {}", path.display());
        thread::spawn(move || {
            let result = read_feature_collection(&path).map_err(|e| format!("{e:#}"));

            // The receiver is gone if a newer load replaced this one.
            let _ = sender.send(result);
            in_progress.store(false, Ordering::Release);
            ctx_handle.request_repaint();
        });
    }

    /// Returns the result of the background load once it is available.
    pub fn check_completion(&mut self) -> LoadResult {
        let Some(receiver) = &self.loading_receiver else {
            return LoadResult::None;
        };
        let Ok(result) = receiver.try_recv() else {
            return LoadResult::None;
        };

        self.loading_receiver = None;
        let path = self.pending_load_path.take();
        match (result, path) {
            (Ok(features), Some(path)) => LoadResult::Success { features, path },
            (Ok(_), None) => LoadResult::Error("load finished without a pending path".into()),
            (Err(message), _) => LoadResult::Error(message),
        }
    }
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_async_loader_creation() {
        let loader = AsyncLoader::new();
        assert!(!loader.is_loading());
        assert!(loader.pending_path().is_none());
    }

    #[test]
    fn test_check_completion_when_idle() {
        let mut loader = AsyncLoader::new();
        assert!(matches!(loader.check_completion(), LoadResult::None));
    }

    #[test]
    fn test_missing_file_reports_error() {
        let ctx = egui::Context::default();
        let mut loader = AsyncLoader::new();
        loader.start_file_load(PathBuf::from("/nonexistent/cities.geojson"), &ctx);

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        loop {
            match loader.check_completion() {
                LoadResult::Error(message) => {
                    assert!(message.contains("cities.geojson"));
                    break;
                }
                LoadResult::Success { .. } => panic!("missing file loaded"),
                LoadResult::None => {
                    assert!(std::time::Instant::now() < deadline, "load never finished");
                    std::thread::sleep(std::time::Duration::from_millis(10));
                }
            }
        }
    }
}
