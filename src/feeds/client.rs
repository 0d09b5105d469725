use super::data::FeatureCollection;
use super::error::{FeedError, Result};
use crate::config::MapConfig;
use reqwest::Client;
use std::time::Duration;

/// HTTP client for the public GeoJSON feeds
///
/// One request per call, no retry: a failed fetch is reported to the caller
/// and the corresponding layer stays empty.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: Client,
    timeout: Duration,
}

impl FeedClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(FeedError::Config("feed timeout must be positive".to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quake_map/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(FeedClient { http, timeout })
    }

    pub fn from_config(config: &MapConfig) -> Result<Self> {
        Self::new(config.timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Download and parse a FeatureCollection
    pub async fn fetch_collection(&self, url: &str) -> Result<FeatureCollection> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FeedError::Config(format!("not an http(s) URL: '{}'", url)));
        }

        tracing::debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = resp.bytes().await?;
        tracing::debug!("  {} bytes from {}", body.len(), url);

        FeatureCollection::from_slice(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port; returns its URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}/feed.geojson", addr)
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = FeedClient::new(Duration::ZERO).unwrap_err();
        assert!(matches!(err, FeedError::Config(_)));
    }

    #[tokio::test]
    async fn test_non_http_url_rejected_without_request() {
        let client = FeedClient::new(Duration::from_secs(5)).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));

        let err = client.fetch_collection("file:///etc/passwd").await.unwrap_err();
        assert!(matches!(err, FeedError::Config(_)));
    }

    #[tokio::test]
    async fn test_error_status_reported() {
        let url = serve_once("404 Not Found", "not here").await;
        let client = FeedClient::new(Duration::from_secs(5)).unwrap();

        let err = client.fetch_collection(&url).await.unwrap_err();
        match err {
            FeedError::Status { url: failed, status } => {
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
                assert_eq!(failed, url);
            }
            other => panic!("expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_collection_decoded_from_response() {
        let url = serve_once(
            "200 OK",
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","id":"ak1","properties":{"mag":2.5},"geometry":{"type":"Point","coordinates":[-150.0,61.0,20.0]}}]}"#,
        )
        .await;
        let client = FeedClient::new(Duration::from_secs(5)).unwrap();

        let collection = client.fetch_collection(&url).await.unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.features[0].id_string().as_deref(), Some("ak1"));
    }

    #[tokio::test]
    async fn test_non_collection_body_rejected() {
        let url = serve_once("200 OK", r#"{"type":"Feature"}"#).await;
        let client = FeedClient::new(Duration::from_secs(5)).unwrap();

        let err = client.fetch_collection(&url).await.unwrap_err();
        assert!(matches!(err, FeedError::InvalidFeature(_)));
    }
}
