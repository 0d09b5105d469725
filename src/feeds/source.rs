//! Where the two feeds come from
//!
//! Implementations:
//! - `LiveSource`: downloads the configured feed URLs (production binary)
//! - `FileSource`: reads local GeoJSON files (dev binary, tests)

use super::client::FeedClient;
use super::data::FeatureCollection;
use super::error::{FeedError, Result};
use crate::config::MapConfig;
use std::path::{Path, PathBuf};

/// Trait for loading the earthquake and plate boundary collections
#[allow(async_fn_in_trait)]
pub trait FeedSource {
    /// Human-readable origin, for logs
    fn describe(&self) -> String;

    /// Earthquake events feed
    async fn earthquakes(&self) -> Result<FeatureCollection>;

    /// Tectonic plate boundaries feed
    async fn plate_boundaries(&self) -> Result<FeatureCollection>;
}

/// Feeds downloaded over HTTP
#[derive(Debug, Clone)]
pub struct LiveSource {
    client: FeedClient,
    earthquakes_url: String,
    plates_url: String,
}

impl LiveSource {
    pub fn new(
        client: FeedClient,
        earthquakes_url: impl Into<String>,
        plates_url: impl Into<String>,
    ) -> Self {
        LiveSource {
            client,
            earthquakes_url: earthquakes_url.into(),
            plates_url: plates_url.into(),
        }
    }

    pub fn from_config(config: &MapConfig) -> Result<Self> {
        let client = FeedClient::from_config(config)?;
        Ok(Self::new(
            client,
            config.earthquakes_url.clone(),
            config.plates_url.clone(),
        ))
    }
}

impl FeedSource for LiveSource {
    fn describe(&self) -> String {
        format!("{} + {}", self.earthquakes_url, self.plates_url)
    }

    async fn earthquakes(&self) -> Result<FeatureCollection> {
        self.client.fetch_collection(&self.earthquakes_url).await
    }

    async fn plate_boundaries(&self) -> Result<FeatureCollection> {
        self.client.fetch_collection(&self.plates_url).await
    }
}

/// Feeds read from local files
#[derive(Debug, Clone)]
pub struct FileSource {
    earthquakes_path: PathBuf,
    plates_path: PathBuf,
}

impl FileSource {
    pub fn new(earthquakes_path: impl Into<PathBuf>, plates_path: impl Into<PathBuf>) -> Self {
        FileSource {
            earthquakes_path: earthquakes_path.into(),
            plates_path: plates_path.into(),
        }
    }

    async fn read(path: &Path) -> Result<FeatureCollection> {
        let bytes = tokio::fs::read(path).await.map_err(|source| FeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        FeatureCollection::from_slice(&bytes)
    }
}

impl FeedSource for FileSource {
    fn describe(&self) -> String {
        format!(
            "{} + {}",
            self.earthquakes_path.display(),
            self.plates_path.display()
        )
    }

    async fn earthquakes(&self) -> Result<FeatureCollection> {
        Self::read(&self.earthquakes_path).await
    }

    async fn plate_boundaries(&self) -> Result<FeatureCollection> {
        Self::read(&self.plates_path).await
    }
}
