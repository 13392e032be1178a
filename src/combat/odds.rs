//! Memoized win probabilities
//!
//! The cache maps an (attackers, defenders) pair to a write-once slot. The
//! map lock is only held long enough to find or create the slot; the value
//! itself is produced inside `OnceLock::get_or_init`, so concurrent first
//! requests for the same pair wait for a single computation while requests
//! for other pairs proceed.
//!
//! Entries are never evicted. The key space is bounded by the largest troop
//! counts seen in play, which keeps growth slow, but a long-lived process
//! hosting many games should watch `len()` and call `clear()` between
//! sessions if memory matters.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use ahash::AHashMap;

/// Cache key: (attacking troops, defending troops)
pub type OddsKey = (u32, u32);

type Slot = Arc<OnceLock<f64>>;

#[derive(Debug, Default)]
pub struct OddsCache {
    slots: Mutex<AHashMap<OddsKey, Slot>>,
}

impl OddsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Published value for a key, if any
    pub fn get(&self, key: OddsKey) -> Option<f64> {
        self.lock().get(&key).and_then(|slot| slot.get().copied())
    }

    /// Return the cached value, computing it first if no one has yet
    ///
    /// `compute` runs at most once per key for the lifetime of the cache
    /// (until `clear`).
    pub fn get_or_compute<F>(&self, key: OddsKey, compute: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        let slot = {
            let mut slots = self.lock();
            Arc::clone(slots.entry(key).or_default())
        };
        *slot.get_or_init(compute)
    }

    /// Number of published values
    pub fn len(&self) -> usize {
        self.lock().values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, AHashMap<OddsKey, Slot>> {
        // A panic inside `compute` never holds this lock, so a poisoned map
        // is still consistent.
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_absent_until_computed() {
        let cache = OddsCache::new();
        assert_eq!(cache.get((3, 2)), None);
        assert!(cache.is_empty());

        let value = cache.get_or_compute((3, 2), || 0.25);
        assert_eq!(value, 0.25);
        assert_eq!(cache.get((3, 2)), Some(0.25));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_computes_once_per_key() {
        let cache = OddsCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..5 {
            let value = cache.get_or_compute((4, 4), || {
                calls.fetch_add(1, Ordering::SeqCst);
                0.5
            });
            assert_eq!(value, 0.5);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_first_value_wins() {
        let cache = OddsCache::new();
        cache.get_or_compute((2, 1), || 0.4);
        let second = cache.get_or_compute((2, 1), || 0.9);
        assert_eq!(second, 0.4);
    }

    #[test]
    fn test_concurrent_first_access_computes_once() {
        let cache = Arc::new(OddsCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                thread::spawn(move || {
                    cache.get_or_compute((10, 7), || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(std::time::Duration::from_millis(20));
                        0.625
                    })
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 0.625);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear_forgets_values() {
        let cache = OddsCache::new();
        cache.get_or_compute((5, 5), || 0.3);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get((5, 5)), None);
    }
}
