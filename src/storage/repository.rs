/*!
 * SQLite-backed subtitle cache.
 *
 * Every operation is retried a fixed number of times with linear backoff
 * before its error is surfaced, so transient lock contention does not bubble
 * up to callers.
 */

use anyhow::Result;
use log::warn;
use rusqlite::OptionalExtension;
use std::path::Path;
use std::thread;
use std::time::Duration;

use super::connection::DatabaseConnection;
use super::{CachedSubtitles, SubtitleCache};
use crate::errors::StorageError;

/// Number of attempts per operation
const MAX_ATTEMPTS: u32 = 3;

/// Backoff step in milliseconds; attempt n waits n * RETRY_STEP_MS
const RETRY_STEP_MS: u64 = 100;

/// Persistent subtitle cache on top of a SQLite connection
pub struct SqliteCache {
    connection: DatabaseConnection,
}

impl SqliteCache {
    /// Open the cache at the default database location
    pub fn new_default() -> Result<Self, StorageError> {
        let connection = DatabaseConnection::new_default()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(Self { connection })
    }

    /// Open the cache at a specific path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let connection =
            DatabaseConnection::new(path).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(Self { connection })
    }

    /// Open an in-memory cache (for testing)
    pub fn new_in_memory() -> Result<Self, StorageError> {
        let connection = DatabaseConnection::new_in_memory()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(Self { connection })
    }

    /// Run an operation with retries and linear backoff
    fn with_retries<T, F>(&self, name: &str, mut op: F) -> Result<T, StorageError>
    where
        F: FnMut(&DatabaseConnection) -> Result<T>,
    {
        let mut last_error = None;

        for attempt in 1..=MAX_ATTEMPTS {
            match op(&self.connection) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(
                        "Cache operation '{}' failed on attempt {}/{}: {}",
                        name, attempt, MAX_ATTEMPTS, e
                    );
                    last_error = Some(e);
                    if attempt < MAX_ATTEMPTS {
                        thread::sleep(Duration::from_millis(RETRY_STEP_MS * attempt as u64));
                    }
                }
            }
        }

        Err(StorageError::OperationFailed(format!(
            "{}: {}",
            name,
            last_error.map(|e| e.to_string()).unwrap_or_default()
        )))
    }
}

impl SubtitleCache for SqliteCache {
    fn save(&self, cached: &CachedSubtitles) -> Result<(), StorageError> {
        let digest = cached.video_digest.clone();
        let content = cached.srt_content.clone();
        let updated_at = cached.updated_at;

        self.with_retries("save", move |conn| {
            conn.execute(|c| {
                c.execute(
                    "INSERT OR REPLACE INTO subtitle_cache (id, video_digest, srt_content, updated_at)
                     VALUES (1, ?1, ?2, ?3)",
                    rusqlite::params![digest, content, updated_at],
                )?;
                Ok(())
            })
        })
    }

    fn load(&self) -> Result<Option<CachedSubtitles>, StorageError> {
        self.with_retries("load", |conn| {
            conn.execute(|c| {
                let row = c
                    .query_row(
                        "SELECT video_digest, srt_content, updated_at FROM subtitle_cache WHERE id = 1",
                        [],
                        |row| {
                            Ok(CachedSubtitles {
                                video_digest: row.get(0)?,
                                srt_content: row.get(1)?,
                                updated_at: row.get(2)?,
                            })
                        },
                    )
                    .optional()?;
                Ok(row)
            })
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.with_retries("clear", |conn| {
            conn.execute(|c| {
                c.execute("DELETE FROM subtitle_cache", [])?;
                Ok(())
            })
        })
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
