//! On-disk cache for service descriptions.
//!
//! Loading the WSDL is a round trip on every connect. When a storage
//! location is configured, fetched descriptions are kept as one JSON file
//! per URL and reused until they are older than the configured timeout.
//!
//! Cache failures are logged and otherwise ignored: a broken cache only
//! costs a refetch.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    url: String,
    fetched_at: u64,
    content: String,
}

/// A directory of cached service descriptions keyed by URL.
#[derive(Debug, Clone)]
pub struct DescriptionCache {
    dir: PathBuf,
    timeout: Duration,
}

impl DescriptionCache {
    /// Creates a cache rooted at `dir`; entries expire after `timeout`.
    pub fn new(dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            dir: dir.into(),
            timeout,
        }
    }

    fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.json", urlencoding::encode(url)))
    }

    /// Returns the cached description for `url` if present and fresh.
    pub async fn get(&self, url: &str) -> Option<String> {
        let path = self.path_for(url);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read cached description"
                );
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt cache entry");
                return None;
            }
        };

        if entry.url != url {
            return None;
        }
        let age = now_secs().saturating_sub(entry.fetched_at);
        if age >= self.timeout.as_secs() {
            tracing::debug!(url = %url, age_secs = age, "Cached description expired");
            return None;
        }

        tracing::debug!(url = %url, "Using cached service description");
        Some(entry.content)
    }

    /// Stores `content` as the description for `url`.
    pub async fn put(&self, url: &str, content: &str) {
        let entry = CacheEntry {
            url: url.to_string(),
            fetched_at: now_secs(),
            content: content.to_string(),
        };
        let path = self.path_for(url);

        let result = async {
            tokio::fs::create_dir_all(&self.dir).await?;
            let raw = serde_json::to_string(&entry).map_err(std::io::Error::other)?;
            tokio::fs::write(&path, raw).await
        }
        .await;

        if let Err(e) = result {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to cache service description"
            );
        }
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
