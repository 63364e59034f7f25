//! Seeded synthetic point features for demos, benchmarks and tests.

use crate::geojson::FeatureData;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};

const DEFAULT_SEED: u64 = 42;

const PREFIXES: &[&str] = &[
    "North", "South", "East", "West", "New", "Old", "Port", "Fort", "Lake", "Mount", "San", "Saint",
];

const STEMS: &[&str] = &[
    "haven", "field", "ford", "brook", "ridge", "vale", "wood", "stead", "mouth", "bury", "ton", "wick",
    "mere", "cliff", "moor",
];

const CATEGORIES: &[&str] = &["city", "town", "village", "hamlet", "port"];

/// Share of features generated without an elevation, to exercise missing values.
const MISSING_ELEVATION: f64 = 0.1;

pub struct FeatureGenerator {
    rng: StdRng,
    generated: usize,
}

impl FeatureGenerator {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            generated: 0,
        }
    }

    /// Number of features produced so far.
    pub fn generated(&self) -> usize {
        self.generated
    }

    pub fn generate(&mut self, count: usize) -> Vec<FeatureData> {
        (0..count).map(|_| self.next_feature()).collect()
    }

    pub fn next_feature(&mut self) -> FeatureData {
        self.generated += 1;
        let rng = &mut self.rng;

        let prefix = PREFIXES[rng.gen_range(0..PREFIXES.len())];
        let stem = STEMS[rng.gen_range(0..STEMS.len())];
        let category = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
        let population: u64 = match category {
            "city" => rng.gen_range(100_000..5_000_000),
            "town" | "port" => rng.gen_range(5_000..100_000),
            _ => rng.gen_range(20..5_000),
        };

        let mut properties = Map::new();
        properties.insert("name".into(), Value::String(format!("{prefix} {}", capitalize(stem))));
        properties.insert("population".into(), json!(population));
        properties.insert("category".into(), json!(category));
        if !rng.gen_bool(MISSING_ELEVATION) {
            properties.insert("elevation".into(), json!(rng.gen_range(-20..3000)));
        }
        properties.insert("capital".into(), json!(category == "city" && rng.gen_bool(0.1)));

        let lon: f64 = rng.gen_range(-180.0..180.0);
        let lat: f64 = rng.gen_range(-85.0..85.0);
        let geometry = json!({
            "type": "Point",
            "coordinates": [round(lon), round(lat)],
        });
        FeatureData::new(properties, Some(geometry))
    }
}

impl Default for FeatureGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn round(coordinate: f64) -> f64 {
    (coordinate * 1e5).round() / 1e5
}
