pub mod feature;
pub mod event;
pub mod host;
pub mod source;
pub mod columns;
pub mod sort;
pub mod window;
pub mod rows;
pub mod selection;
pub mod layout;
pub mod debounce;
pub mod hooks;
pub mod options;
pub mod error;
pub mod table;
pub mod geojson;
pub mod generator;

// Export the record model
pub use feature::{Feature, FeatureKey, Record, GEOMETRY_PROPERTY};
pub use event::{ListenerKey, Listeners};

// Export record containers and the store adapter
pub use source::{
    ChangeNotifier, CollectionEvent, FeatureCollection, RecordProvider, RecordSource,
    SourceCapabilities, SourceEvent, StoreAdapter, StoreChange, StoreChangeKind, VectorSource,
};

// Export pipeline stages
pub use columns::{resolve_columns, Column};
pub use sort::{compare_values, sort_records, SortDir, SortRule, SortRules};
pub use window::{Window, WindowManager, WindowRequest};
pub use rows::{Row, RowEvent, RowMaterializer, RowShell, ShellId};
pub use selection::{SelectOptions, SelectionTracker};
pub use layout::{LayoutController, LayoutMetrics, LayoutMode};
pub use debounce::Debouncer;

// Export the control and its configuration
pub use table::{FeatureTable, PipelineStats, TableEvent};
pub use hooks::{DefaultHooks, TableHooks};
pub use host::{HostContext, ManualHost, SystemHost};
pub use options::{TableOptions, ROW_HEIGHT};
pub use error::TableError;

// Export GeoJSON I/O and synthetic data
pub use geojson::{
    into_records, parse_feature_collection, read_feature_collection, FeatureCollectionWriter,
    FeatureData,
};
pub use generator::FeatureGenerator;
