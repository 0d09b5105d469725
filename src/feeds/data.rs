//! GeoJSON models and earthquake parsing
//!
//! Only the subset of GeoJSON the map needs is modeled. Geometries are kept
//! as raw JSON so plate boundary lines pass through untouched; earthquake
//! features are validated here and turned into `EarthquakeEvent`s. This is
//! the only place feature validation happens: the encoder assumes events
//! are well formed.

use super::error::{FeedError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn feature_collection_type() -> String {
    "FeatureCollection".to_string()
}

fn feature_type() -> String {
    "Feature".to_string()
}

/// A GeoJSON FeatureCollection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "feature_collection_type")]
    pub kind: String,

    #[serde(default)]
    pub features: Vec<Feature>,

    /// Feed metadata, bbox and other members, kept for pass-through
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeatureCollection {
    pub fn empty() -> Self {
        FeatureCollection {
            kind: feature_collection_type(),
            features: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let collection: FeatureCollection = serde_json::from_slice(bytes)?;
        if collection.kind != "FeatureCollection" {
            return Err(FeedError::InvalidFeature(format!(
                "expected a FeatureCollection, got '{}'",
                collection.kind
            )));
        }
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// A single GeoJSON feature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default)]
    pub geometry: Option<Geometry>,

    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    /// Feature id as text, for log messages and output
    pub fn id_string(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn property(&self, name: &str) -> Option<&Value> {
        self.properties.as_ref()?.get(name)
    }
}

/// A GeoJSON geometry, coordinates kept as raw JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub coordinates: Value,

    /// `geometries` of a GeometryCollection and any foreign members
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One earthquake, as read from a feed feature
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeEvent {
    pub id: Option<String>,
    pub magnitude: f64,
    pub depth_km: f64,
    pub place: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Origin time in epoch milliseconds, when the feed provides it
    pub time_ms: Option<i64>,
}

impl EarthquakeEvent {
    pub fn new(
        magnitude: f64,
        depth_km: f64,
        place: impl Into<String>,
        longitude: f64,
        latitude: f64,
    ) -> Self {
        EarthquakeEvent {
            id: None,
            magnitude,
            depth_km,
            place: place.into(),
            longitude,
            latitude,
            time_ms: None,
        }
    }

    /// Build an event from a feed feature
    ///
    /// Requires a Point geometry with `[lon, lat, depth]` coordinates and a
    /// numeric `properties.mag`. A missing or null `place` becomes "".
    pub fn from_feature(feature: &Feature) -> Result<Self> {
        let label = feature.id_string().unwrap_or_else(|| "<no id>".to_string());

        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| FeedError::InvalidFeature(format!("{}: no geometry", label)))?;

        if geometry.kind != "Point" {
            return Err(FeedError::InvalidFeature(format!(
                "{}: expected Point geometry, got '{}'",
                label, geometry.kind
            )));
        }

        let coords = geometry.coordinates.as_array().ok_or_else(|| {
            FeedError::InvalidFeature(format!("{}: coordinates are not an array", label))
        })?;

        let coord = |idx: usize, what: &str| -> Result<f64> {
            coords.get(idx).and_then(Value::as_f64).ok_or_else(|| {
                FeedError::InvalidFeature(format!("{}: missing {} coordinate", label, what))
            })
        };

        let longitude = coord(0, "longitude")?;
        let latitude = coord(1, "latitude")?;
        let depth_km = coord(2, "depth")?;

        let magnitude = feature
            .property("mag")
            .and_then(Value::as_f64)
            .ok_or_else(|| FeedError::InvalidFeature(format!("{}: no magnitude", label)))?;

        let place = feature
            .property("place")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        let time_ms = feature.property("time").and_then(Value::as_i64);

        Ok(EarthquakeEvent {
            id: feature.id_string(),
            magnitude,
            depth_km,
            place,
            longitude,
            latitude,
            time_ms,
        })
    }
}

/// Events parsed from a feed, with the count of features that were dropped
#[derive(Debug, Clone, Default)]
pub struct ParsedEvents {
    /// Valid events in feed order
    pub events: Vec<EarthquakeEvent>,
    pub skipped: usize,
}

/// Convert every feature of an earthquake feed, skipping invalid ones
pub fn parse_earthquakes(collection: &FeatureCollection) -> ParsedEvents {
    let mut parsed = ParsedEvents {
        events: Vec::with_capacity(collection.len()),
        skipped: 0,
    };

    for feature in &collection.features {
        match EarthquakeEvent::from_feature(feature) {
            Ok(event) => {
                if event.magnitude < 0.0 {
                    tracing::warn!(
                        id = event.id.as_deref().unwrap_or("<no id>"),
                        magnitude = event.magnitude,
                        "Negative magnitude, marker radius will be negative"
                    );
                }
                parsed.events.push(event);
            }
            Err(e) => {
                tracing::warn!("Skipping feature: {}", e);
                parsed.skipped += 1;
            }
        }
    }

    tracing::debug!(
        "Parsed {} events ({} skipped) from {} features",
        parsed.events.len(),
        parsed.skipped,
        collection.len()
    );

    parsed
}
