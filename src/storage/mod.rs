/*!
 * Storage module for persisting the most recent subtitle set between runs.
 *
 * This module provides SQLite-based persistence for:
 * - The last converted subtitle document
 * - The digest of the video it was transcribed from, for cache hits
 *
 * When the database cannot be opened a volatile in-memory store takes its
 * place behind the same trait, so a broken cache never blocks conversion.
 */

// Allow dead code - storage types are for library consumers
#![allow(dead_code)]

pub mod connection;
pub mod fallback;
pub mod repository;
pub mod schema;

use log::warn;

use crate::errors::StorageError;

// Re-export main types
pub use connection::DatabaseConnection;
pub use fallback::VolatileCache;
pub use repository::SqliteCache;

/// One cached subtitle set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSubtitles {
    /// SHA-256 digest of the source video, when the set came from transcription
    pub video_digest: Option<String>,
    /// The subtitle document in SRT format
    pub srt_content: String,
    /// Unix timestamp of the last update
    pub updated_at: i64,
}

/// Backend-independent interface to the subtitle cache
pub trait SubtitleCache: Send + Sync {
    /// Store a subtitle set, replacing any previous one
    fn save(&self, cached: &CachedSubtitles) -> Result<(), StorageError>;

    /// Load the most recently stored subtitle set, if any
    fn load(&self) -> Result<Option<CachedSubtitles>, StorageError>;

    /// Remove everything from the cache
    fn clear(&self) -> Result<(), StorageError>;

    /// Human-readable backend name, for log messages
    fn backend_name(&self) -> &'static str;
}

/// Result of probing the cache backend at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    /// Whether the persistent backend answered the probe
    pub healthy: bool,
    /// Probe outcome in words
    pub message: String,
}

/// Probe a backend with a read and report whether it answered
pub fn check_health(cache: &dyn SubtitleCache) -> HealthReport {
    match cache.load() {
        Ok(_) => HealthReport {
            healthy: true,
            message: format!("{} backend is working correctly", cache.backend_name()),
        },
        Err(e) => HealthReport {
            healthy: false,
            message: format!("{} backend error: {}", cache.backend_name(), e),
        },
    }
}

/// Open the persistent cache, falling back to a volatile store when it
/// cannot be opened or fails its health probe.
///
/// The fallback is logged once as a warning; callers treat the result
/// identically either way.
pub fn open_with_fallback() -> Box<dyn SubtitleCache> {
    match SqliteCache::new_default() {
        Ok(cache) => {
            let report = check_health(&cache);
            if report.healthy {
                Box::new(cache)
            } else {
                warn!(
                    "Subtitle cache unhealthy ({}), using in-memory fallback",
                    report.message
                );
                Box::new(VolatileCache::new())
            }
        }
        Err(e) => {
            warn!("Subtitle cache unavailable ({}), using in-memory fallback", e);
            Box::new(VolatileCache::new())
        }
    }
}
