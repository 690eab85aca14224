//! The seam to whatever supplies creature records.

use crate::data::species::{CreatureRecord, MAX_SPECIES_ID, MIN_SPECIES_ID};
use crate::error::{EngineError, Result};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

pub fn check_id(id: u32) -> Result<()> {
    if (MIN_SPECIES_ID..=MAX_SPECIES_ID).contains(&id) {
        Ok(())
    } else {
        Err(EngineError::InvalidCreatureId(id))
    }
}

pub trait CreatureProvider {
    /// Fails for ids outside 1..=150 and on any provider-side failure.
    fn fetch(&self, id: u32) -> Result<CreatureRecord>;
}

impl<P: CreatureProvider + ?Sized> CreatureProvider for &P {
    fn fetch(&self, id: u32) -> Result<CreatureRecord> {
        (**self).fetch(id)
    }
}

/// Memoises records by id so a session sees one record per id.
/// Failures are not cached; retrying is left to the inner provider.
pub struct CachedProvider<P> {
    inner: P,
    cache: Mutex<HashMap<u32, CreatureRecord>>,
}

impl<P: CreatureProvider> CachedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: CreatureProvider> CreatureProvider for CachedProvider<P> {
    fn fetch(&self, id: u32) -> Result<CreatureRecord> {
        check_id(id)?;
        if let Ok(cache) = self.cache.lock() {
            if let Some(record) = cache.get(&id) {
                debug!(id, "creature cache hit");
                return Ok(record.clone());
            }
        }
        debug!(id, "creature cache miss");
        let record = self.inner.fetch(id)?;
        record.validate()?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.entry(id).or_insert_with(|| record.clone());
        }
        Ok(record)
    }
}
