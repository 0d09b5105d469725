//! Output rendering: styled GeoJSON and the standalone map page
//!
//! The page does no encoding of its own. Every marker carries its
//! precomputed style and popup text; the page only hands them to the
//! mapping library.

use super::popup::{escape_html, popup_text};
use super::spec::MapSpec;
use crate::encoding::{build_style, StyleDescriptor};
use crate::feeds::{EarthquakeEvent, FeatureCollection};
use serde::Serialize;
use serde_json::{json, Value};

/// Page template; placeholders are replaced by `render_html`
const MAP_PAGE_TEMPLATE: &str = include_str!("page.html");

/// An event with everything needed to draw it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub event: EarthquakeEvent,
    pub style: StyleDescriptor,
    pub popup: String,
}

impl Marker {
    pub fn from_event(event: EarthquakeEvent) -> Self {
        let style = build_style(&event);
        let popup = popup_text(&event);
        Marker { event, style, popup }
    }

    /// GeoJSON Point feature carrying the style and popup in its properties
    pub fn to_feature(&self) -> Value {
        let event = &self.event;
        let mut feature = json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [event.longitude, event.latitude, event.depth_km],
            },
            "properties": {
                "mag": event.magnitude,
                "depth": event.depth_km,
                "place": event.place,
                "time": event.time_ms,
                "popup": self.popup,
                "style": self.style,
            },
        });
        if let Some(id) = &event.id {
            feature["id"] = Value::String(id.clone());
        }
        feature
    }
}

/// Encode every event, keeping input order
pub fn encode_markers(events: Vec<EarthquakeEvent>) -> Vec<Marker> {
    events.into_iter().map(Marker::from_event).collect()
}

/// FeatureCollection of styled earthquake markers
pub fn render_styled_geojson(markers: &[Marker]) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": markers.iter().map(Marker::to_feature).collect::<Vec<_>>(),
    })
}

/// Serialize a value for embedding inside a `<script>` element
fn script_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(json.replace("</", "<\\/"))
}

/// Standalone HTML page with the map, both overlays and the legend
pub fn render_html(
    spec: &MapSpec,
    markers: &[Marker],
    plates: &FeatureCollection,
) -> serde_json::Result<String> {
    let spec_json = script_json(spec)?;
    let quakes_json = script_json(&render_styled_geojson(markers))?;
    let plates_json = script_json(plates)?;
    let legend_json = script_json(&spec.legend.rows_html())?;
    let title = escape_html(&spec.title);

    Ok(fill_template(
        MAP_PAGE_TEMPLATE,
        &[
            ("__TITLE__", title.as_str()),
            ("__MAP_SPEC__", spec_json.as_str()),
            ("__LEGEND_ROWS__", legend_json.as_str()),
            ("__EARTHQUAKES__", quakes_json.as_str()),
            ("__PLATES__", plates_json.as_str()),
        ],
    ))
}

/// Substitute placeholders in a single pass over the template
///
/// Inserted values are never rescanned, so feed text that happens to look
/// like a placeholder stays as it is.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    loop {
        let next = values
            .iter()
            .filter_map(|(key, value)| rest.find(key).map(|pos| (pos, *key, *value)))
            .min_by_key(|(pos, _, _)| *pos);

        match next {
            Some((pos, key, value)) => {
                out.push_str(&rest[..pos]);
                out.push_str(value);
                rest = &rest[pos + key.len()..];
            }
            None => {
                out.push_str(rest);
                break;
            }
        }
    }

    out
}
