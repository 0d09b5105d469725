//! Map property definitions with defaults from map.json
//!
//! map.json is embedded at compile time and declares every configurable
//! property with its default. User values (CLI flags, map_config.json,
//! `QUAKE_MAP_*` environment variables) are layered on top by
//! `PropertyReader`; anything missing or invalid falls back to map.json.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// map.json embedded at compile time
const MAP_JSON: &str = include_str!("../map.json");

/// Prefix of environment variables that override properties
pub const ENV_PREFIX: &str = "QUAKE_MAP_";

/// Property definition from map.json
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    #[serde(rename = "defaultValue", default)]
    pub default_value: String,
    #[serde(default)]
    pub description: String,
    /// For EnumeratedProperty, the valid values
    #[serde(rename = "values", default)]
    pub valid_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PropertyKind {
    #[serde(rename = "StringProperty")]
    String,
    #[serde(rename = "EnumeratedProperty")]
    Enumerated,
    #[serde(rename = "DoubleProperty")]
    Double,
}

#[derive(Debug, Deserialize)]
struct MapManifest {
    properties: Vec<PropertyDef>,
}

/// Registry of all map properties with their defaults from map.json
#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
    /// Declaration order, for listing
    names: Vec<String>,
}

impl PropertyRegistry {
    /// Parse a manifest in the map.json format
    pub fn from_json(json: &str) -> Result<Self, String> {
        let manifest: MapManifest =
            serde_json::from_str(json).map_err(|e| format!("Failed to parse map.json: {}", e))?;

        let mut registry = Self::default();
        for def in manifest.properties {
            registry.names.push(def.name.clone());
            registry.properties.insert(def.name.clone(), def);
        }

        Ok(registry)
    }

    /// Get the default value for a property
    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    /// Get the property definition
    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Property names in declaration order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true) // Non-enumerated properties accept any value
    }

    /// Canonical spelling of an enumerated value (case-insensitive match)
    fn canonical_enum_value(&self, name: &str, value: &str) -> Option<&str> {
        self.properties
            .get(name)?
            .valid_values
            .as_ref()?
            .iter()
            .find(|v| v.eq_ignore_ascii_case(value))
            .map(String::as_str)
    }
}

static REGISTRY: OnceLock<PropertyRegistry> = OnceLock::new();

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    REGISTRY.get_or_init(|| {
        PropertyRegistry::from_json(MAP_JSON).unwrap_or_else(|e| {
            tracing::error!("{}", e);
            PropertyRegistry::default()
        })
    })
}

/// Environment variable name for a property: `map.zoom` → `QUAKE_MAP_MAP_ZOOM`
pub fn env_var_name(property: &str) -> String {
    format!(
        "{}{}",
        ENV_PREFIX,
        property.to_uppercase().replace(['.', '-'], "_")
    )
}

/// Typed property reader
///
/// User-set values take precedence; everything else comes from map.json.
#[derive(Debug, Clone, Default)]
pub struct PropertyReader {
    user_values: HashMap<String, String>,
}

impl PropertyReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from explicit name → value pairs (empty values are ignored)
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut reader = Self::new();
        for (name, value) in pairs {
            reader.set(name, value);
        }
        reader
    }

    /// Read overrides from `QUAKE_MAP_*` environment variables
    pub fn from_env() -> Self {
        let mut reader = Self::new();
        for name in registry().names() {
            if let Ok(value) = std::env::var(env_var_name(name)) {
                reader.set(name.clone(), value);
            }
        }
        reader
    }

    /// Set a user value; an empty value means "not set"
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if value.is_empty() {
            self.user_values.remove(&name);
        } else {
            if registry().get_property(&name).is_none() {
                tracing::warn!("Unknown property '{}' (value '{}') will be ignored", name, value);
            }
            self.user_values.insert(name, value);
        }
    }

    /// Merge a JSON object of overrides (as in map_config.json)
    ///
    /// Strings, numbers and booleans are accepted; other values are skipped.
    pub fn merge_json(&mut self, json: &str) -> serde_json::Result<()> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        for (key, value) in map {
            let value_str = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    tracing::warn!("Ignoring non-scalar value for '{}': {}", key, other);
                    continue;
                }
            };
            self.set(key, value_str);
        }
        Ok(())
    }

    /// Layer another reader's values over this one
    pub fn merge(&mut self, other: PropertyReader) {
        self.user_values.extend(other.user_values);
    }

    /// Get string property (user value or default from map.json)
    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }

        registry().get_default(name).unwrap_or("").to_string()
    }

    /// Get optional string property (None if empty)
    pub fn get_optional_string(&self, name: &str) -> Option<String> {
        let value = self.get_string(name);
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Get enumerated property with validation
    ///
    /// Returns the canonical spelling of the user value if valid, otherwise
    /// the default. Logs a warning if the user value is invalid.
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            if let Some(canonical) = reg.canonical_enum_value(name, value) {
                return canonical.to_string();
            }
            if reg.is_valid_enum_value(name, value) {
                return value.clone();
            }
            let valid_values = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            tracing::warn!(
                "Invalid value '{}' for property '{}'. Valid values: [{}]. Using default: '{}'",
                value,
                name,
                valid_values,
                default
            );
        }

        default.to_string()
    }

    fn default_f64(name: &str) -> f64 {
        registry()
            .get_default(name)
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(0.0)
    }

    /// Get f64 property, falling back to the default when unparsable
    pub fn get_f64(&self, name: &str) -> f64 {
        let default = Self::default_f64(name);
        let value = self.get_string(name);

        if value.trim().is_empty() {
            return default;
        }

        match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                tracing::warn!(
                    "Invalid numeric value '{}' for property '{}'. Using default: {}",
                    value,
                    name,
                    default
                );
                default
            }
        }
    }

    /// Get f64 property with range validation
    pub fn get_f64_in_range(&self, name: &str, min: f64, max: f64) -> f64 {
        let value = self.get_f64(name);
        if (min..=max).contains(&value) {
            value
        } else {
            let default = Self::default_f64(name);
            tracing::warn!(
                "Value {} for property '{}' out of range [{}, {}]. Using default: {}",
                value,
                name,
                min,
                max,
                default
            );
            default
        }
    }

    /// Parse a "lat,lon" pair
    ///
    /// Returns None if empty, malformed, or outside [-90, 90] × [-180, 180].
    pub fn get_lat_lon(&self, name: &str) -> Option<(f64, f64)> {
        let value = self.get_string(name);
        let parsed = parse_lat_lon(&value);
        if parsed.is_none() && !value.is_empty() {
            tracing::warn!(
                "Invalid coordinate '{}' for property '{}', expected 'lat,lon'",
                value,
                name
            );
        }
        parsed
    }
}

/// Parse "lat,lon" with range checks
pub fn parse_lat_lon(value: &str) -> Option<(f64, f64)> {
    let (lat, lon) = value.split_once(',')?;
    let lat = lat.trim().parse::<f64>().ok()?;
    let lon = lon.trim().parse::<f64>().ok()?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return None;
    }

    Some((lat, lon))
}
