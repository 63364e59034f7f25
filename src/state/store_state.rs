//! Record store state management.
//!
//! Owns the live store the table is bound to, where its contents came from,
//! and the generator used for synthetic features.

use rand::seq::SliceRandom;
use rlayertable::{FeatureGenerator, Record, VectorSource};
use std::path::PathBuf;
use std::rc::Rc;

/// Where the store contents came from.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreOrigin {
    Empty,
    File(PathBuf),
    Generated { seed: u64 },
}

/// State related to the live record store.
///
/// Responsibilities:
/// - Holding the shared `VectorSource` the table observes
/// - Tracking the origin of the loaded features
/// - Producing synthetic features on demand
pub struct StoreState {
    store: Rc<VectorSource>,
    origin: StoreOrigin,
    generator: FeatureGenerator,
    seed: u64,
}

impl StoreState {
    pub fn new() -> Self {
        Self {
            store: VectorSource::shared(),
            origin: StoreOrigin::Empty,
            generator: FeatureGenerator::new(),
            seed: 42,
        }
    }

    // ===== Queries =====

    pub fn store(&self) -> &Rc<VectorSource> {
        &self.store
    }

    pub fn origin(&self) -> &StoreOrigin {
        &self.origin
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    // ===== Mutations =====

    /// Replaces the store contents with records read from `path`.
    pub fn load_file(&mut self, records: Vec<Record>, path: PathBuf) {
        self.store.clear();
        self.store.add_features(records);
        self.origin = StoreOrigin::File(path);
    }

    /// Replaces the store contents with `count` synthetic features.
    ///
    /// Every call uses the next seed so repeated generation changes the data.
    pub fn generate(&mut self, count: usize) {
        self.generator = FeatureGenerator::with_seed(self.seed);
        let records = self.generator.generate(count).into_iter().map(|f| f.into_record());
        self.store.clear();
        self.store.add_features(records);
        self.origin = StoreOrigin::Generated { seed: self.seed };
        self.seed += 1;
    }

    /// Adds one synthetic feature and returns it.
    pub fn add_random(&mut self) -> Record {
        let record = self.generator.next_feature().into_record();
        self.store.add_features([Rc::clone(&record)]);
        record
    }

    /// Removes a random feature, if any. The store does not announce single
    /// removals, so callers refresh the table afterwards.
    pub fn remove_random(&mut self) -> Option<Record> {
        let features = self.store.get_features();
        let victim = features.choose(&mut rand::thread_rng())?;
        self.store.remove_feature(victim);
        Some(Rc::clone(victim))
    }

    /// Removes `record` from the store. Returns false if it was not there.
    pub fn remove(&mut self, record: &Record) -> bool {
        self.store.remove_feature(record)
    }
}

impl Default for StoreState {
    fn default() -> Self {
        Self::new()
    }
}
