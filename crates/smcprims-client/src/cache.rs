use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use smcprims_frame::{FourCharCode, KeyInfo};
use tracing::{debug, warn};

type KeyInfoMap = HashMap<FourCharCode, KeyInfo>;

/// Counters describing cache effectiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    /// Inserts that lost a race against an earlier insert for the same key.
    pub discarded: u64,
}

/// Memoized key metadata: key → (size, type, attributes).
///
/// The map is created lazily on first use and dropped by [`reset`], after
/// which the next use creates it again. One mutex guards the whole map and is
/// held only for the map operation itself, so callers never hold it across a
/// transport call.
///
/// Inserts are insert-if-absent: when two callers race to populate the same
/// key, the first value stays and later ones are discarded.
///
/// [`reset`]: KeyInfoCache::reset
#[derive(Debug)]
pub struct KeyInfoCache {
    map: Mutex<Option<KeyInfoMap>>,
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    discarded: AtomicU64,
}

impl KeyInfoCache {
    pub const fn new() -> Self {
        Self {
            map: Mutex::new(None),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            inserts: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        }
    }

    /// Cached metadata for `key`, if any.
    pub fn get(&self, key: FourCharCode) -> Option<KeyInfo> {
        let mut guard = self.lock();
        let found = ensure_initialized(&mut guard).get(&key).copied();
        drop(guard);

        match found {
            Some(_) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(%key, "key info cache hit");
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(%key, "key info cache miss");
            }
        }
        found
    }

    /// Store `info` unless `key` already has an entry; returns the retained entry.
    pub fn insert_if_absent(&self, key: FourCharCode, info: KeyInfo) -> KeyInfo {
        let mut guard = self.lock();
        let map = ensure_initialized(&mut guard);
        let mut inserted = false;
        let retained = *map.entry(key).or_insert_with(|| {
            inserted = true;
            info
        });
        drop(guard);

        if inserted {
            self.inserts.fetch_add(1, Ordering::Relaxed);
        } else {
            self.discarded.fetch_add(1, Ordering::Relaxed);
            if retained != info {
                warn!(%key, ?retained, discarded = ?info, "conflicting key info discarded");
            }
        }
        retained
    }

    /// Drop every entry and mark the cache for re-initialization.
    ///
    /// Safe to call when the cache was never used, and while other threads are
    /// using it.
    pub fn reset(&self) {
        let mut guard = self.lock();
        let dropped = guard.take().map_or(0, |map| map.len());
        drop(guard);
        debug!(dropped, "key info cache reset");
    }

    /// Number of cached keys.
    pub fn len(&self) -> usize {
        self.lock().as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the map currently exists (used since creation or last reset).
    pub fn is_initialized(&self) -> bool {
        self.lock().is_some()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
        }
    }

    // Every mutation completes before the guard drops, so a poisoned map is
    // still consistent.
    fn lock(&self) -> MutexGuard<'_, Option<KeyInfoMap>> {
        self.map.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for KeyInfoCache {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_initialized<'a>(slot: &'a mut MutexGuard<'_, Option<KeyInfoMap>>) -> &'a mut KeyInfoMap {
    slot.get_or_insert_with(|| {
        debug!("key info cache initialized");
        HashMap::new()
    })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use super::*;

    fn info(size: u32, ty: &str) -> KeyInfo {
        KeyInfo {
            data_size: size,
            data_type: FourCharCode::from_text(ty),
            attributes: 0x80,
        }
    }

    #[test]
    fn starts_uninitialized_and_initializes_on_first_use() {
        let cache = KeyInfoCache::new();
        assert!(!cache.is_initialized());
        assert_eq!(cache.get(FourCharCode::from_text("TC0P")), None);
        assert!(cache.is_initialized());
        assert!(cache.is_empty());
    }

    #[test]
    fn first_insert_wins() {
        let cache = KeyInfoCache::new();
        let key = FourCharCode::from_text("TC0P");

        assert_eq!(cache.insert_if_absent(key, info(2, "sp78")), info(2, "sp78"));
        assert_eq!(cache.insert_if_absent(key, info(4, "flt ")), info(2, "sp78"));
        assert_eq!(cache.get(key), Some(info(2, "sp78")));

        let stats = cache.stats();
        assert_eq!(stats.inserts, 1);
        assert_eq!(stats.discarded, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn reset_without_use_is_harmless() {
        let cache = KeyInfoCache::new();
        cache.reset();
        cache.reset();
        assert!(!cache.is_initialized());
    }

    #[test]
    fn reset_drops_entries_and_cache_is_reusable() {
        let cache = KeyInfoCache::new();
        let key = FourCharCode::from_text("F0Ac");
        cache.insert_if_absent(key, info(4, "flt "));
        assert_eq!(cache.len(), 1);

        cache.reset();
        assert!(!cache.is_initialized());
        assert_eq!(cache.get(key), None);

        cache.insert_if_absent(key, info(2, "fpe2"));
        assert_eq!(cache.get(key), Some(info(2, "fpe2")));
    }

    #[test]
    fn concurrent_inserts_keep_one_value() {
        let cache = Arc::new(KeyInfoCache::new());
        let barrier = Arc::new(Barrier::new(16));
        let key = FourCharCode::from_text("TB0T");

        let handles: Vec<_> = (0..16u32)
            .map(|i| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache.insert_if_absent(key, info(i + 1, "sp78"))
                })
            })
            .collect();

        let retained: Vec<KeyInfo> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winner = cache.get(key).unwrap();
        assert!(retained.iter().all(|r| *r == winner));
        assert_eq!(cache.stats().inserts, 1);
        assert_eq!(cache.stats().discarded, 15);
    }

    #[test]
    fn reset_races_with_readers() {
        let cache = Arc::new(KeyInfoCache::new());
        let key = FourCharCode::from_text("PSTR");

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for _ in 0..500 {
                        cache.insert_if_absent(key, info(4, "flt "));
                        if let Some(found) = cache.get(key) {
                            assert_eq!(found, info(4, "flt "));
                        }
                    }
                })
            })
            .collect();

        for _ in 0..200 {
            cache.reset();
        }
        for worker in workers {
            worker.join().unwrap();
        }
        assert!(cache.len() <= 1);
    }
}
