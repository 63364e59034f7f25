//! GeoJSON `FeatureCollection` input and output.
//!
//! Files are parsed into [`FeatureData`], plain `Send` values that can cross
//! a loader thread, and turned into records on the thread that owns the
//! table. Paths ending in `.br` are Brotli-compressed.

use crate::error::TableError;
use crate::feature::{Feature, Record, GEOMETRY_PROPERTY};
use brotli::enc::BrotliEncoderParams;
use brotli::{CompressorWriter, Decompressor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// One feature as stored in a GeoJSON document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureData {
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Value>,
}

impl FeatureData {
    pub fn new(properties: Map<String, Value>, geometry: Option<Value>) -> Self {
        Self { properties, geometry }
    }

    /// Builds a record carrying the geometry under the `geometry` property.
    pub fn into_record(self) -> Record {
        let mut properties = self.properties;
        if let Some(geometry) = self.geometry {
            properties.insert(GEOMETRY_PROPERTY.to_string(), geometry);
        }
        Feature::record(properties)
    }

    pub fn from_feature(feature: &Feature) -> Self {
        let mut properties = feature.properties().clone();
        let geometry = properties.shift_remove(GEOMETRY_PROPERTY);
        Self { properties, geometry }
    }
}

pub fn into_records(features: Vec<FeatureData>) -> Vec<Record> {
    features.into_iter().map(FeatureData::into_record).collect()
}

/// Parses a `FeatureCollection` (or a single `Feature`) document.
pub fn parse_feature_collection(reader: impl Read) -> Result<Vec<FeatureData>, TableError> {
    let document: Value = serde_json::from_reader(reader)?;
    let kind = document.get("type").and_then(Value::as_str).unwrap_or_default();
    match kind {
        "FeatureCollection" => {
            let features = document
                .get("features")
                .and_then(Value::as_array)
                .ok_or_else(|| TableError::Format("FeatureCollection without a features array".into()))?;
            features
                .iter()
                .enumerate()
                .map(|(i, feature)| parse_feature(feature).map_err(|e| TableError::Format(format!("feature {i}: {e}"))))
                .collect()
        }
        "Feature" => Ok(vec![parse_feature(&document).map_err(TableError::Format)?]),
        other => Err(TableError::Format(format!("unsupported document type '{other}'"))),
    }
}

fn parse_feature(value: &Value) -> Result<FeatureData, String> {
    if value.get("type").and_then(Value::as_str) != Some("Feature") {
        return Err("not a Feature object".into());
    }
    let properties = match value.get("properties") {
        Some(Value::Object(map)) => map.clone(),
        Some(Value::Null) | None => Map::new(),
        Some(_) => return Err("properties must be an object".into()),
    };
    let geometry = value.get("geometry").filter(|g| !g.is_null()).cloned();
    Ok(FeatureData { properties, geometry })
}

/// Reads a GeoJSON file, decompressing `.br` files on the fly.
pub fn read_feature_collection(path: &Path) -> Result<Vec<FeatureData>, TableError> {
    let file = File::open(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let reader: Box<dyn Read> = if is_brotli(path) {
        Box::new(BufReader::new(Decompressor::new(file, 4096)))
    } else {
        Box::new(BufReader::new(file))
    };
    let features = parse_feature_collection(reader)?;
    log::info!("read {} features from {}", features.len(), path.display());
    Ok(features)
}

fn is_brotli(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("br")
}

/// Streams features into a `FeatureCollection` document.
///
/// Brotli compression is enabled when the path ends with `.br`.
///
/// ```no_run
/// # use rlayertable::{FeatureCollectionWriter, FeatureData};
/// # fn main() -> Result<(), rlayertable::TableError> {
/// let mut writer = FeatureCollectionWriter::create("cities.geojson.br")?;
/// writer.write_feature(&FeatureData::default())?;
/// writer.finish()?;
/// # Ok(())
/// # }
/// ```
pub struct FeatureCollectionWriter {
    writer: Box<dyn Write>,
    path: PathBuf,
    feature_count: usize,
}

impl FeatureCollectionWriter {
    pub fn create(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| TableError::Io {
            path: path.clone(),
            source,
        })?;

        let writer: Box<dyn Write> = if is_brotli(&path) {
            let params = BrotliEncoderParams {
                quality: 6,
                lgwin: 22,
                ..Default::default()
            };
            Box::new(CompressorWriter::with_params(BufWriter::new(file), 4096, &params))
        } else {
            Box::new(BufWriter::new(file))
        };
        Self::from_writer(writer, path)
    }

    /// Writes to an arbitrary sink; `path` is only used in error messages.
    pub fn from_writer(writer: Box<dyn Write>, path: PathBuf) -> Result<Self, TableError> {
        let mut this = Self {
            writer,
            path,
            feature_count: 0,
        };
        this.write_raw(b"{\"type\":\"FeatureCollection\",\"features\":[\n")?;
        Ok(this)
    }

    pub fn write_feature(&mut self, feature: &FeatureData) -> Result<(), TableError> {
        let mut object = Map::new();
        object.insert("type".into(), Value::String("Feature".into()));
        object.insert("properties".into(), Value::Object(feature.properties.clone()));
        object.insert("geometry".into(), feature.geometry.clone().unwrap_or(Value::Null));
        let line = serde_json::to_string(&Value::Object(object))?;

        if self.feature_count > 0 {
            self.write_raw(b",\n")?;
        }
        self.write_raw(line.as_bytes())?;
        self.feature_count += 1;
        Ok(())
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Closes the document and flushes. Returns the number of features written.
    pub fn finish(mut self) -> Result<usize, TableError> {
        self.write_raw(b"\n]}\n")?;
        let path = self.path.clone();
        self.writer.flush().map_err(|source| TableError::Io { path, source })?;
        Ok(self.feature_count)
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<(), TableError> {
        self.writer.write_all(bytes).map_err(|source| TableError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
