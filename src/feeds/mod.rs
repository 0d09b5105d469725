//! GeoJSON feed access
//!
//! Structure:
//! - `client.rs`: HTTP client for the public feeds
//! - `source.rs`: `FeedSource` trait with live and file-backed impls
//! - `data.rs`: GeoJSON models and earthquake parsing/validation
//! - `error.rs`: Error types

pub mod client;
pub mod data;
pub mod error;
pub mod source;

pub use client::FeedClient;
pub use data::{
    parse_earthquakes, EarthquakeEvent, Feature, FeatureCollection, Geometry, ParsedEvents,
};
pub use error::{FeedError, Result};
pub use source::{FeedSource, FileSource, LiveSource};
