//! Marker style for a single earthquake
//!
//! The encoder trusts its input: an `EarthquakeEvent` only exists once the
//! feed layer has validated the feature (see `feeds::data`). No defaults are
//! substituted here for missing or odd values.

use super::color::{ColorToken, BLACK};
use super::depth_scale::depth_to_color;
use crate::feeds::EarthquakeEvent;
use serde::Serialize;

/// Radius used for zero-magnitude events so they stay visible
pub const MIN_RADIUS: f64 = 1.0;

/// Radius per unit of magnitude
pub const RADIUS_PER_MAGNITUDE: f64 = 5.0;

pub const MARKER_OPACITY: f64 = 0.5;
pub const MARKER_FILL_OPACITY: f64 = 0.5;
pub const MARKER_STROKE_WEIGHT: f64 = 0.5;

/// Visual attributes of one circle marker
///
/// Serialized with the path option names of the page's mapping library
/// (`color`/`weight` for the stroke) so it can be handed over unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDescriptor {
    pub fill_color: ColorToken,
    pub radius: f64,
    #[serde(rename = "color")]
    pub stroke_color: ColorToken,
    #[serde(rename = "weight")]
    pub stroke_weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
    pub stroke: bool,
}

/// Circle radius for a magnitude
///
/// Exactly zero maps to `MIN_RADIUS`. Negative magnitudes give a negative
/// radius; this is not clamped.
pub fn magnitude_to_radius(magnitude: f64) -> f64 {
    if magnitude == 0.0 {
        MIN_RADIUS
    } else {
        magnitude * RADIUS_PER_MAGNITUDE
    }
}

/// Style for one event: color from depth, radius from magnitude
pub fn build_style(event: &EarthquakeEvent) -> StyleDescriptor {
    StyleDescriptor {
        fill_color: depth_to_color(event.depth_km),
        radius: magnitude_to_radius(event.magnitude),
        stroke_color: BLACK,
        stroke_weight: MARKER_STROKE_WEIGHT,
        opacity: MARKER_OPACITY,
        fill_opacity: MARKER_FILL_OPACITY,
        stroke: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::color::RED;

    fn event(magnitude: f64, depth_km: f64) -> EarthquakeEvent {
        EarthquakeEvent::new(magnitude, depth_km, "Test Place", -120.0, 36.0)
    }

    #[test]
    fn test_magnitude_to_radius() {
        assert_eq!(magnitude_to_radius(0.0), 1.0);
        assert_eq!(magnitude_to_radius(-0.0), 1.0);
        assert_eq!(magnitude_to_radius(4.5), 22.5);
        assert_eq!(magnitude_to_radius(0.1), 0.5);
    }

    #[test]
    fn test_negative_magnitude_is_not_clamped() {
        assert_eq!(magnitude_to_radius(-2.0), -10.0);
    }

    #[test]
    fn test_build_style_end_to_end() {
        let style = build_style(&event(6.1, 95.0));
        assert_eq!(style.fill_color, RED);
        assert!((style.radius - 30.5).abs() < 1e-9);
        assert_eq!(style.opacity, 0.5);
        assert_eq!(style.fill_opacity, 0.5);
        assert_eq!(style.stroke_color, BLACK);
        assert_eq!(style.stroke_weight, 0.5);
        assert!(style.stroke);
    }

    #[test]
    fn test_build_style_is_pure() {
        let quake = event(3.2, 42.0);
        let first = build_style(&quake);
        let second = build_style(&quake);
        assert_eq!(first, second);
        assert_eq!(first.radius.to_bits(), second.radius.to_bits());
    }

    #[test]
    fn test_style_serializes_as_path_options() {
        let value = serde_json::to_value(build_style(&event(0.0, 5.0))).unwrap();
        assert_eq!(value["fillColor"], "green");
        assert_eq!(value["radius"], 1.0);
        assert_eq!(value["color"], "black");
        assert_eq!(value["weight"], 0.5);
        assert_eq!(value["fillOpacity"], 0.5);
        assert_eq!(value["stroke"], true);
    }
}
