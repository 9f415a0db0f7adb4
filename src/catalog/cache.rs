// Catalog caching behind an injected store.
//
// The store owns the TTL policy: a stale entry reads as a miss, so callers
// only ever see a fresh catalog or nothing.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::catalog::player::PlayerCatalog;

/// Default freshness window for a fetched catalog.
pub const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Cache abstraction for loaded catalogs. Implementations decide freshness;
/// `get` returns None for both empty and expired entries.
pub trait CatalogStore: Send + Sync {
    fn get(&self) -> Option<PlayerCatalog>;
    fn set(&self, catalog: PlayerCatalog);
    fn invalidate(&self);
}

struct Entry {
    at: Instant,
    catalog: PlayerCatalog,
}

/// In-memory store with a fixed TTL, safe to share across tasks.
pub struct MemoryCatalogStore {
    ttl: Duration,
    slot: Mutex<Option<Entry>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        MemoryCatalogStore {
            ttl,
            slot: Mutex::new(None),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Entry>> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn get(&self) -> Option<PlayerCatalog> {
        let guard = self.lock();
        let entry = guard.as_ref()?;
        if entry.at.elapsed() < self.ttl {
            Some(entry.catalog.clone())
        } else {
            None
        }
    }

    fn set(&self, catalog: PlayerCatalog) {
        *self.lock() = Some(Entry {
            at: Instant::now(),
            catalog,
        });
    }

    fn invalidate(&self) {
        *self.lock() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::player::ScoringFormat;

    fn sample_catalog() -> PlayerCatalog {
        PlayerCatalog::empty(2025, ScoringFormat::Ppr)
    }

    #[test]
    fn empty_store_misses() {
        let store = MemoryCatalogStore::new();
        assert!(store.get().is_none());
    }

    #[test]
    fn fresh_entry_hits() {
        let store = MemoryCatalogStore::with_ttl(Duration::from_secs(3600));
        store.set(sample_catalog());
        let hit = store.get().expect("fresh entry should hit");
        assert_eq!(hit.season, 2025);
    }

    #[test]
    fn expired_entry_misses() {
        // Zero TTL: the entry is stale the instant it is written.
        let store = MemoryCatalogStore::with_ttl(Duration::ZERO);
        store.set(sample_catalog());
        assert!(store.get().is_none());
    }

    #[test]
    fn invalidate_clears_entry() {
        let store = MemoryCatalogStore::with_ttl(Duration::from_secs(3600));
        store.set(sample_catalog());
        store.invalidate();
        assert!(store.get().is_none());
    }

    #[test]
    fn set_replaces_previous_entry() {
        let store = MemoryCatalogStore::with_ttl(Duration::from_secs(3600));
        store.set(sample_catalog());
        let mut newer = sample_catalog();
        newer.season = 2026;
        store.set(newer);
        assert_eq!(store.get().map(|c| c.season), Some(2026));
    }
}
