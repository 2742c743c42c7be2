//! HTTP client for the community track dataset, with a TTL cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, warn};

use encore_core::config::TracksConfig;
use encore_core::error::EncoreError;

use crate::model::{parse_tracks, Track};

/// Track list handed to callers, with how fresh it is.
#[derive(Debug, Clone)]
pub struct TrackSnapshot {
    pub tracks: Arc<Vec<Track>>,
    /// Served from cache rather than a fresh fetch.
    pub cached: bool,
    /// Cache was past its TTL but the refresh failed.
    pub stale: bool,
}

struct CacheEntry {
    tracks: Arc<Vec<Track>>,
    fetched_at: Instant,
}

/// Fetches and caches the dataset. One instance is shared by every
/// command handler; the cache sits behind a mutex so overlapping
/// lookups trigger at most one refresh.
pub struct TracksClient {
    http: reqwest::Client,
    data_url: String,
    ttl: Duration,
    cache: Mutex<Option<CacheEntry>>,
}

impl TracksClient {
    pub fn new(config: &TracksConfig) -> Result<Self, EncoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()
            .map_err(|e| EncoreError::Http(format!("failed to build http client: {e}")))?;
        Ok(Self {
            http,
            data_url: config.data_url.clone(),
            ttl: Duration::from_secs(config.cache_ttl_mins * 60),
            cache: Mutex::new(None),
        })
    }

    /// Current track list, fetched at most once per TTL window.
    ///
    /// A failed refresh serves the previous list marked stale instead
    /// of failing the caller; only a cold start with no cache at all
    /// surfaces the fetch error.
    pub async fn tracks(&self) -> Result<TrackSnapshot, EncoreError> {
        let mut cache = self.cache.lock().await;

        if let Some(entry) = cache.as_ref() {
            if entry.fetched_at.elapsed() < self.ttl {
                return Ok(TrackSnapshot {
                    tracks: entry.tracks.clone(),
                    cached: true,
                    stale: false,
                });
            }
        }

        match self.fetch().await {
            Ok(tracks) => {
                let tracks = Arc::new(tracks);
                *cache = Some(CacheEntry {
                    tracks: tracks.clone(),
                    fetched_at: Instant::now(),
                });
                Ok(TrackSnapshot {
                    tracks,
                    cached: false,
                    stale: false,
                })
            }
            Err(e) => match cache.as_ref() {
                Some(entry) => {
                    warn!("tracks: refresh failed ({e}), serving stale cache");
                    Ok(TrackSnapshot {
                        tracks: entry.tracks.clone(),
                        cached: true,
                        stale: true,
                    })
                }
                None => Err(e),
            },
        }
    }

    /// Fetch fresh data now, replacing the cache whatever its age.
    pub async fn force_refresh(&self) -> Result<TrackSnapshot, EncoreError> {
        let mut cache = self.cache.lock().await;
        let tracks = Arc::new(self.fetch().await?);
        *cache = Some(CacheEntry {
            tracks: tracks.clone(),
            fetched_at: Instant::now(),
        });
        Ok(TrackSnapshot {
            tracks,
            cached: false,
            stale: false,
        })
    }

    async fn fetch(&self) -> Result<Vec<Track>, EncoreError> {
        debug!("tracks: fetching {}", self.data_url);
        let response = self
            .http
            .get(&self.data_url)
            .send()
            .await
            .map_err(|e| EncoreError::Http(format!("track fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| EncoreError::Http(format!("track fetch failed: {e}")))?;
        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| EncoreError::Http(format!("track data unreadable: {e}")))?;
        let tracks = parse_tracks(&data);
        debug!("tracks: loaded {} entries", tracks.len());
        Ok(tracks)
    }
}
