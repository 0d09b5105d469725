//! Earthquake Map - library
//!
//! Turns the USGS earthquake feed and the PB2002 plate boundary feed into a
//! Leaflet map page. Each event becomes a circle marker whose fill color
//! encodes depth and whose radius encodes magnitude.
//!
//! Module organization:
//! - `encoding`: depth color scale, radius and marker style (pure functions)
//! - `feeds`: GeoJSON types, HTTP client and feed sources
//! - `map`: basemaps, legend, popups and the HTML/GeoJSON renderers
//! - `config`: typed `MapConfig` built from properties
//! - `properties`: property registry (map.json) and reader
//! - `pipeline`: fetch → parse → encode → compose → render
//! - `logging`: tracing subscriber setup for the binaries
//! - `profile`: phase timing and memory checkpoints

pub mod config;
pub mod encoding;
pub mod feeds;
pub mod logging;
pub mod map;
pub mod pipeline;
pub mod profile;
pub mod properties;
