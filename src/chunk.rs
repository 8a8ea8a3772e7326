//! Contiguous work partitioning and the scoped parallel-for built on it.
//!
//! A [`ChunkPlan`] splits `[0, total)` into at most `workers` ordered,
//! non-overlapping ranges. Every range is `total / workers` long except the
//! last, which absorbs the remainder:
//!
//! ```
//! use lorenz_wave::chunk::plan;
//!
//! let chunks = plan(10, 4);
//! assert_eq!(chunks.ranges(), &[0..2, 2..4, 4..6, 6..10]);
//! ```

use std::ops::Range;
use std::thread;

/// Ordered partition of an index range into worker-sized slices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChunkPlan {
    total: usize,
    ranges: Vec<Range<usize>>,
}

/// Partition `[0, total)` across `workers`.
///
/// Empty ranges are never produced, so fewer items than workers collapses to a
/// single range and `total == 0` gives an empty plan. `workers == 0` is
/// treated as one worker.
pub fn plan(total: usize, workers: usize) -> ChunkPlan {
    let workers = workers.max(1);
    let size = total / workers;

    let mut ranges = Vec::with_capacity(workers.min(total));
    if size > 0 {
        let mut start = 0;
        for _ in 0..workers - 1 {
            ranges.push(start..start + size);
            start += size;
        }
        ranges.push(start..total);
    } else if total > 0 {
        ranges.push(0..total);
    }

    ChunkPlan { total, ranges }
}

impl ChunkPlan {
    /// Length of the partitioned range.
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    /// The ranges in index order.
    #[inline]
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Number of chunks (and of workers spawned per pass).
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Run `work` over every chunk of `items` in parallel and wait for all of them.
    ///
    /// Each worker gets the global index of its first item and an exclusive
    /// sub-slice. One scoped thread is spawned per chunk and joined before
    /// returning; nothing is collected from the workers.
    ///
    /// # Panics
    ///
    /// Panics if `items.len()` differs from the planned total, or if a worker
    /// panics.
    pub fn for_each_mut<T, F>(&self, items: &mut [T], work: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync,
    {
        assert_eq!(
            items.len(),
            self.total,
            "chunk plan covers {} items but {} were given",
            self.total,
            items.len()
        );

        let work = &work;
        thread::scope(|scope| {
            let mut rest = items;
            for range in &self.ranges {
                let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
                rest = tail;
                let start = range.start;
                scope.spawn(move || work(start, chunk));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn assert_partition(p: &ChunkPlan, total: usize, workers: usize) {
        assert!(p.len() <= workers.max(1));
        let mut next = 0;
        for r in p.ranges() {
            assert_eq!(r.start, next, "gap or overlap at {}", next);
            assert!(r.end > r.start, "empty range {:?}", r);
            next = r.end;
        }
        assert_eq!(next, total);
    }

    #[test]
    fn test_plan_ten_by_four() {
        let p = plan(10, 4);
        assert_eq!(p.ranges(), &[0..2, 2..4, 4..6, 6..10]);
        assert_eq!(p.total(), 10);
    }

    #[test]
    fn test_plan_even_split() {
        let p = plan(100_000, 4);
        assert_eq!(
            p.ranges(),
            &[0..25_000, 25_000..50_000, 50_000..75_000, 75_000..100_000]
        );
    }

    #[test]
    fn test_plan_empty() {
        let p = plan(0, 4);
        assert!(p.is_empty());
        assert_eq!(p.total(), 0);
    }

    #[test]
    fn test_plan_fewer_items_than_workers() {
        let p = plan(3, 8);
        assert_eq!(p.ranges(), &[0..3]);
    }

    #[test]
    fn test_plan_zero_workers_is_one() {
        let p = plan(7, 0);
        assert_eq!(p.ranges(), &[0..7]);
    }

    #[test]
    fn test_plan_huge_worker_count() {
        assert_eq!(plan(10, usize::MAX).ranges(), &[0..10]);
        assert_eq!(plan(10, 1_000_000_000).ranges(), &[0..10]);
        assert!(plan(0, usize::MAX).is_empty());
    }

    #[test]
    fn test_plan_random_partitions() {
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let total = rng.gen_range(0..5_000);
            let workers = rng.gen_range(1..64);
            assert_partition(&plan(total, workers), total, workers);
        }
    }

    #[test]
    fn test_for_each_mut_visits_every_index_once() {
        let p = plan(1_003, 4);
        let mut items = vec![0usize; 1_003];
        let calls = AtomicUsize::new(0);

        p.for_each_mut(&mut items, |start, chunk| {
            calls.fetch_add(1, Ordering::SeqCst);
            for (offset, item) in chunk.iter_mut().enumerate() {
                *item += start + offset + 1;
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        for (i, item) in items.iter().enumerate() {
            assert_eq!(*item, i + 1);
        }
    }

    #[test]
    fn test_for_each_mut_empty_plan_spawns_nothing() {
        let p = plan(0, 4);
        let mut items: Vec<u8> = Vec::new();
        p.for_each_mut(&mut items, |_, _| panic!("no chunk expected"));
    }

    #[test]
    #[should_panic(expected = "chunk plan covers")]
    fn test_for_each_mut_rejects_length_mismatch() {
        let p = plan(10, 2);
        let mut items = vec![0u8; 9];
        p.for_each_mut(&mut items, |_, _| {});
    }
}
