//! Elevation profile loading, statistics and gradient computation.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

pub mod export;
pub mod label;
pub mod load;
pub mod stats;

pub use load::{
    load_export, load_pairs, load_path, load_table, resolve, synthesize, LoadOutcome, Loaded,
    Resolved, SourceConfig, SourceKind, SyntheticParams,
};
pub use stats::{analyze, gradient_series, valid_samples, Analysis, GradientPoint, Statistics};

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("invalid sample at index {index}: {message}")]
    InvalidSample { index: usize, message: String },
    #[error("no valid elevation data")]
    NoValidData,
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}

impl ProfileError {
    /// True when the error means the source file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            ProfileError::Io(err) => err.kind() == std::io::ErrorKind::NotFound,
            ProfileError::Csv(err) => matches!(
                err.kind(),
                csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound
            ),
            _ => false,
        }
    }
}

/// One (distance, elevation) sample. A missing elevation is `None`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub distance: f64,
    pub elevation: Option<f64>,
}

impl Sample {
    /// Builds a sample, mapping a NaN elevation to missing.
    pub fn new(distance: f64, elevation: f64) -> Self {
        Self {
            distance,
            elevation: if elevation.is_nan() {
                None
            } else {
                Some(elevation)
            },
        }
    }

    pub fn missing(distance: f64) -> Self {
        Self {
            distance,
            elevation: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.elevation.map_or(false, f64::is_finite)
    }
}

impl From<(f64, Option<f64>)> for Sample {
    fn from((distance, elevation): (f64, Option<f64>)) -> Self {
        match elevation {
            Some(e) => Sample::new(distance, e),
            None => Sample::missing(distance),
        }
    }
}

/// Ordered samples along a one-dimensional path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub samples: Vec<Sample>,
}

impl Profile {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
}

impl FromIterator<Sample> for Profile {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Profile::new(iter.into_iter().collect())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

impl Point {
    /// Coordinates from a JSON object; a non-numeric coordinate reads as missing.
    /// `None` unless `value` is a non-empty object.
    fn from_json(value: &JsonValue) -> Option<Self> {
        let object = value.as_object().filter(|o| !o.is_empty())?;
        Some(Self {
            x: object.get("x").and_then(JsonValue::as_f64),
            y: object.get("y").and_then(JsonValue::as_f64),
        })
    }
}

/// Display-only metadata written by the upstream profile generator.
///
/// Deserialization never fails on field types: a known key holding an
/// unexpected type is left in `extra` and its typed field stays `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(rename = "inputCRS", skip_serializing_if = "Option::is_none")]
    pub input_crs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point1: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point2: Option<Point>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl From<JsonValue> for Metadata {
    fn from(value: JsonValue) -> Self {
        let JsonValue::Object(object) = value else {
            return Metadata::default();
        };
        let mut meta = Metadata::default();
        for (key, value) in object {
            let taken = match key.as_str() {
                "timestamp" => value.as_str().map(|s| meta.timestamp = Some(s.to_string())),
                "inputCRS" => value.as_str().map(|s| meta.input_crs = Some(s.to_string())),
                "point1" => Point::from_json(&value).map(|p| meta.point1 = Some(p)),
                "point2" => Point::from_json(&value).map(|p| meta.point2 = Some(p)),
                _ => None,
            };
            if taken.is_none() {
                meta.extra.insert(key, value);
            }
        }
        meta
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Metadata::from)
    }
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.timestamp.is_none()
            && self.input_crs.is_none()
            && self.point1.is_none()
            && self.point2.is_none()
            && self.extra.is_empty()
    }

    /// Both endpoints, when each was given as a non-empty object.
    pub fn endpoints(&self) -> Option<(&Point, &Point)> {
        self.point1.as_ref().zip(self.point2.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_elevation_is_missing() {
        let sample = Sample::new(3.0, f64::NAN);
        assert_eq!(sample.elevation, None);
        assert!(!sample.is_valid());
        assert!(Sample::new(3.0, 12.5).is_valid());
        assert!(!Sample::new(3.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn metadata_keeps_unknown_keys() {
        let meta: Metadata = serde_json::from_str(
            r#"{"timestamp":"2024-01-02T03:04:05.678Z","inputCRS":"EPSG:4326",
                "point1":{"x":1.0,"y":2.0},"point2":{"x":3.0},"numSamples":50}"#,
        )
        .unwrap();
        assert_eq!(meta.input_crs.as_deref(), Some("EPSG:4326"));
        assert_eq!(meta.point2.as_ref().unwrap().y, None);
        assert_eq!(meta.extra.get("numSamples"), Some(&JsonValue::from(50)));
        assert!(meta.endpoints().is_some());
        assert!(Metadata::default().is_empty());
    }

    #[test]
    fn endpoints_require_both_points() {
        let meta: Metadata =
            serde_json::from_str(r#"{"point1":{"x":1.0,"y":2.0},"point2":{}}"#).unwrap();
        assert!(meta.point2.is_none());
        assert!(meta.endpoints().is_none());
    }

    #[test]
    fn point_with_unrelated_keys_counts_as_endpoint() {
        let meta: Metadata =
            serde_json::from_str(r#"{"point1":{"lon":1.0},"point2":{"x":3.0,"y":4.0}}"#)
                .unwrap();
        let (p1, _) = meta.endpoints().unwrap();
        assert_eq!(*p1, Point::default());
    }

    #[test]
    fn wrongly_typed_metadata_is_kept_as_extra() {
        let meta: Metadata = serde_json::from_str(
            r#"{"inputCRS":4326,"timestamp":"2024-05-01T10:20:30Z",
                "point1":{"x":"10.5","y":59.9},"point2":"somewhere"}"#,
        )
        .unwrap();
        assert_eq!(meta.input_crs, None);
        assert_eq!(meta.extra.get("inputCRS"), Some(&JsonValue::from(4326)));
        assert_eq!(meta.timestamp.as_deref(), Some("2024-05-01T10:20:30Z"));
        assert_eq!(
            meta.point1,
            Some(Point {
                x: None,
                y: Some(59.9)
            })
        );
        assert_eq!(meta.point2, None);
        assert!(meta.extra.contains_key("point2"));
        assert!(Metadata::from(JsonValue::from(7)).is_empty());
    }
}
