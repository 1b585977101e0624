/*!
 * Volatile in-memory fallback store.
 *
 * Engaged when the SQLite cache cannot be opened. Contents live for the
 * duration of the process only; the interface is identical to the persistent
 * backend so callers never branch on which one they got.
 */

use parking_lot::RwLock;

use super::{CachedSubtitles, SubtitleCache};
use crate::errors::StorageError;

/// In-memory subtitle cache
#[derive(Default)]
pub struct VolatileCache {
    slot: RwLock<Option<CachedSubtitles>>,
}

impl VolatileCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubtitleCache for VolatileCache {
    fn save(&self, cached: &CachedSubtitles) -> Result<(), StorageError> {
        *self.slot.write() = Some(cached.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<CachedSubtitles>, StorageError> {
        Ok(self.slot.read().clone())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.write() = None;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
