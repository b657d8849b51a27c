use rayon::prelude::*;

/// Sparse table for range minimum queries in constant time.
///
/// Level `k` stores the minimum of every window of length `2^k`, so every query is answered by
/// two overlapping windows.
#[derive(Debug)]
pub(crate) struct SparseTable<T> {
    levels: Vec<Vec<T>>,
}

impl<T: Copy + Ord + Send + Sync> SparseTable<T> {
    pub(crate) fn new(base: Vec<T>) -> Self {
        let mut levels = vec![base];
        let mut window = 1;

        while 2 * window <= levels[0].len() {
            let previous = &levels[levels.len() - 1];
            let next: Vec<T> = (0..previous.len() - window)
                .into_par_iter()
                .map(|i| previous[i].min(previous[i + window]))
                .collect();

            levels.push(next);
            window *= 2;
        }

        Self { levels }
    }

    pub(crate) fn len(&self) -> usize {
        self.levels[0].len()
    }

    /// Minimum of the inclusive range `lo..=hi`.
    pub(crate) fn min(&self, lo: usize, hi: usize) -> T {
        debug_assert!(lo <= hi && hi < self.len());

        let level = (hi - lo + 1).ilog2() as usize;
        let window = 1 << level;
        let values = &self.levels[level];

        values[lo].min(values[hi + 1 - window])
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn single_element() {
        let table = SparseTable::new(vec![42u32]);
        assert_eq!(table.min(0, 0), 42);
    }

    #[test]
    fn all_ranges_against_brute_force() {
        let mut rng = StdRng::seed_from_u64(23);
        let values: Vec<u32> = (0..150).map(|_| rng.random_range(0..50)).collect();
        let table = SparseTable::new(values.clone());

        for lo in 0..values.len() {
            for hi in lo..values.len() {
                let expected = *values[lo..=hi].iter().min().unwrap();
                assert_eq!(table.min(lo, hi), expected, "range {lo}..={hi}");
            }
        }
    }
}
