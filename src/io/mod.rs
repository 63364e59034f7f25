//! I/O modules for background file loading.

pub mod async_loader;

pub use async_loader::{AsyncLoader, LoadResult};
