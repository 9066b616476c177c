//! Document Store Loader
//!
//! Fetches the document index once at startup. The source is either an
//! `http(s)://` URL or a local file path. Failures never abort the session:
//! they are logged and the session runs on an empty index.

use crate::document::DocumentStore;
use crate::error::{Result, TitanError};
use std::time::Duration;
use tracing::{error, info};

/// Request timeout for remote indexes
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the document index comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Remote(String),
    Local(std::path::PathBuf),
}

impl DocumentSource {
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            DocumentSource::Remote(source.to_string())
        } else {
            DocumentSource::Local(source.into())
        }
    }
}

impl std::fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentSource::Remote(url) => f.write_str(url),
            DocumentSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch and parse the index, propagating any failure
pub async fn fetch(source: &DocumentSource) -> Result<DocumentStore> {
    let body = match source {
        DocumentSource::Remote(url) => {
            let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
            let response = client.get(url).send().await?;
            if !response.status().is_success() {
                return Err(TitanError::HttpStatus(response.status().as_u16()));
            }
            response.text().await?
        }
        DocumentSource::Local(path) => tokio::fs::read_to_string(path).await?,
    };
    DocumentStore::from_json(&body)
}

/// Load the index, falling back to an empty store on failure
pub async fn load(source: &DocumentSource) -> DocumentStore {
    match fetch(source).await {
        Ok(store) => {
            info!(source = %source, documents = store.len(), "document index loaded");
            store
        }
        Err(e) => {
            error!(source = %source, kind = e.kind(), "failed to load document index: {}", e);
            DocumentStore::new()
        }
    }
}
