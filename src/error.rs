//! Error type of the library.
//!
//! Configuration mistakes and transient data races degrade silently inside
//! the table. Only misuse of the API and I/O in the format adapters surface
//! as errors.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A data operation ran before `set_records` bound a source.
    #[error("no record source bound; call set_records first")]
    NoSource,

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid GeoJSON: {0}")]
    Format(String),
}
