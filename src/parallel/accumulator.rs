use std::collections::BTreeMap;
use std::ops::AddAssign;

use parking_lot::{Mutex, MutexGuard};

/// A fixed number of mutex-guarded shards, each owning a slice of the
/// key space selected by `key mod shard_count`. Modeled on
/// `original_source/search-server/concurrent_map.h`'s `ConcurrentMap`,
/// generalized from `double` to `f64` and restricted, as the original is,
/// to an integral key (`i32`) so the shard selector is a total,
/// constant-time operation.
///
/// Intended usage is many concurrent `acc.get_ref(k) += delta` calls across
/// unrelated keys; striping keeps the critical section to a single hashed
/// lookup and addition, reducing contention to roughly `1 / shard_count`.
pub struct ShardedAccumulator {
    shards: Vec<Mutex<BTreeMap<i32, f64>>>,
}

/// A scoped handle to one entry, held open for the duration of the
/// accumulation. The shard's lock is released when this value is dropped.
pub struct AccumulatorRef<'a> {
    guard: MutexGuard<'a, BTreeMap<i32, f64>>,
    key: i32,
}

impl AddAssign<f64> for AccumulatorRef<'_> {
    fn add_assign(&mut self, delta: f64) {
        *self.guard.entry(self.key).or_insert(0.0) += delta;
    }
}

impl ShardedAccumulator {
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0, "shard_count must be positive");
        let shards = (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect();
        ShardedAccumulator { shards }
    }

    fn shard_index(&self, key: i32) -> usize {
        (key as u32 as usize) % self.shards.len()
    }

    /// Returns a scoped reference to `value[key]`, creating it (as `0.0`)
    /// if absent. Holds the owning shard's lock for the reference's scope.
    pub fn get_ref(&self, key: i32) -> AccumulatorRef<'_> {
        let idx = self.shard_index(key);
        AccumulatorRef {
            guard: self.shards[idx].lock(),
            key,
        }
    }

    /// Removes `key` from whichever shard owns it. No-op if absent.
    pub fn erase(&self, key: i32) {
        let idx = self.shard_index(key);
        self.shards[idx].lock().remove(&key);
    }

    /// Acquires each shard in turn and merges its entries into a single
    /// ascending-by-key map. Not a hot path, intended for end-of-query
    /// materialization only.
    pub fn build_ordered(&self) -> BTreeMap<i32, f64> {
        let mut result = BTreeMap::new();
        for shard in &self.shards {
            result.extend(shard.lock().iter().map(|(&k, &v)| (k, v)));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn get_ref_accumulates_across_calls() {
        let acc = ShardedAccumulator::new(8);
        acc.get_ref(1) += 0.5;
        acc.get_ref(1) += 0.25;
        assert_eq!(acc.build_ordered()[&1], 0.75);
    }

    #[test]
    fn erase_removes_the_key() {
        let acc = ShardedAccumulator::new(8);
        acc.get_ref(3) += 1.0;
        acc.erase(3);
        assert!(acc.build_ordered().get(&3).is_none());
    }

    #[test]
    fn build_ordered_merges_all_shards_ascending() {
        let acc = ShardedAccumulator::new(4);
        for k in [5, 1, 9, 3] {
            acc.get_ref(k) += k as f64;
        }
        let keys: Vec<i32> = acc.build_ordered().keys().copied().collect();
        assert_eq!(keys, vec![1, 3, 5, 9]);
    }

    #[test]
    fn concurrent_accumulation_is_exact() {
        let acc = ShardedAccumulator::new(8);
        (0..1000).into_par_iter().for_each(|i| {
            acc.get_ref(i % 17) += 1.0;
        });
        let total: f64 = acc.build_ordered().values().sum();
        assert_eq!(total as i64, 1000);
    }
}
