use crate::{
    data::ingest::{ingest_with_report, IngestReport},
    MapError, Result,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use std::path::PathBuf;

/// Shared HTTP client so repeated loads reuse the connection pool.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("methane-map/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Anything that can hand over the raw permit payload.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human readable location, for logs
    fn location(&self) -> String;

    /// Fetch the whole payload as text
    async fn fetch_text(&self) -> Result<String>;
}

/// Payload stored on the local filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_text(&self) -> Result<String> {
        #[cfg(feature = "tokio-runtime")]
        let text = tokio::fs::read_to_string(&self.path).await?;
        #[cfg(not(feature = "tokio-runtime"))]
        let text = std::fs::read_to_string(&self.path)?;
        Ok(text)
    }
}

/// Payload served over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch_text(&self) -> Result<String> {
        let resp = HTTP_CLIENT.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(MapError::Source(format!(
                "{} returned HTTP {}",
                self.url,
                resp.status()
            )));
        }
        Ok(resp.text().await?)
    }
}

/// Picks a source for a configured location: `http(s)://` URLs go over the
/// network, everything else is read from disk.
pub fn source_for(location: &str) -> Box<dyn DataSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Fetches the payload once and ingests it.
///
/// Only a failed fetch is an error; bad rows are accounted for in the report.
/// There is no retry and no de-duplication: two calls fetch twice.
pub async fn load(source: &dyn DataSource) -> Result<IngestReport> {
    let location = source.location();
    log::debug!("fetching permit payload from {}", location);

    let text = source.fetch_text().await.map_err(|e| {
        log::error!("failed to fetch {}: {}", location, e);
        e
    })?;

    Ok(ingest_with_report(&text))
}
