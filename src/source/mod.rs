//! Record containers and the adapter that binds the table to them.
//!
//! - Observable collection (`add` / `remove` per feature)
//! - Queryable vector source (`loadend` per batch)
//! - Store adapter (one list accessor plus one change channel)

pub mod adapter;
pub mod collection;
pub mod vector;

pub use adapter::{
    ChangeNotifier, RecordProvider, RecordSource, SourceCapabilities, StoreAdapter, StoreChange,
    StoreChangeKind,
};
pub use collection::{CollectionEvent, FeatureCollection};
pub use vector::{SourceEvent, VectorSource};
