/// Below this many output elements, merging happens sequentially.
const SEQUENTIAL_THRESHOLD: usize = 1 << 13;

/// Merges the sorted sequences `left` and `right` into `out`.
///
/// `leq(a, b)` decides whether `a` from `left` goes before `b` from `right`. On ties according to
/// `leq`, elements from `left` come first. The sequences are split at the median of the longer one,
/// the matching split point of the shorter one is found by binary search and both halves are merged
/// in parallel.
pub(crate) fn par_merge<T, F>(left: &[T], right: &[T], out: &mut [T], leq: &F)
where
    T: Copy + Send + Sync,
    F: Fn(&T, &T) -> bool + Sync,
{
    debug_assert_eq!(left.len() + right.len(), out.len());

    if out.len() <= SEQUENTIAL_THRESHOLD || left.is_empty() || right.is_empty() {
        sequential_merge(left, right, out, leq);
        return;
    }

    let (left_split, right_split) = if left.len() >= right.len() {
        let left_split = left.len() / 2;
        let pivot = &left[left_split];
        (
            left_split,
            right.partition_point(|candidate| !leq(pivot, candidate)),
        )
    } else {
        let right_split = right.len() / 2;
        let pivot = &right[right_split];
        (
            left.partition_point(|candidate| leq(candidate, pivot)),
            right_split,
        )
    };

    let (left_low, left_high) = left.split_at(left_split);
    let (right_low, right_high) = right.split_at(right_split);
    let (out_low, out_high) = out.split_at_mut(left_split + right_split);

    rayon::join(
        || par_merge(left_low, right_low, out_low, leq),
        || par_merge(left_high, right_high, out_high, leq),
    );
}

fn sequential_merge<T, F>(left: &[T], right: &[T], out: &mut [T], leq: &F)
where
    T: Copy,
    F: Fn(&T, &T) -> bool,
{
    let mut l = 0;
    let mut r = 0;

    for slot in out.iter_mut() {
        let take_left = r == right.len() || (l < left.len() && leq(&left[l], &right[r]));

        if take_left {
            *slot = left[l];
            l += 1;
        } else {
            *slot = right[r];
            r += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    fn merged(left: &[(u32, u8)], right: &[(u32, u8)]) -> Vec<(u32, u8)> {
        let mut out = vec![(0, 0); left.len() + right.len()];
        par_merge(left, right, &mut out, &|a: &(u32, u8), b: &(u32, u8)| {
            a.0 <= b.0
        });
        out
    }

    fn expected(left: &[(u32, u8)], right: &[(u32, u8)]) -> Vec<(u32, u8)> {
        let mut all: Vec<_> = left.iter().chain(right).copied().collect();
        // stable, so left elements stay in front of equal right elements
        all.sort_by_key(|&(key, _)| key);
        all
    }

    #[test]
    fn one_side_empty() {
        let left = [(1, 0), (2, 0)];

        assert_eq!(merged(&left, &[]), left.to_vec());
        assert_eq!(merged(&[], &left), left.to_vec());
        assert!(merged(&[], &[]).is_empty());
    }

    #[test]
    fn ties_prefer_left() {
        let left = [(1, 0), (3, 0)];
        let right = [(1, 1), (2, 1), (3, 1)];

        assert_eq!(
            merged(&left, &right),
            vec![(1, 0), (1, 1), (2, 1), (3, 0), (3, 1)]
        );
    }

    #[test]
    fn interleaved_runs_above_threshold() {
        let mut rng = StdRng::seed_from_u64(5);

        let mut left: Vec<(u32, u8)> = (0..40_000).map(|_| (rng.random_range(0..1000), 0)).collect();
        let mut right: Vec<(u32, u8)> = (0..30_000).map(|_| (rng.random_range(0..1000), 1)).collect();
        left.sort();
        right.sort();

        assert_eq!(merged(&left, &right), expected(&left, &right));
    }

    #[test]
    fn lopsided_sizes() {
        let mut rng = StdRng::seed_from_u64(11);

        let mut left: Vec<(u32, u8)> = (0..25).map(|_| (rng.random_range(0..100_000), 0)).collect();
        let mut right: Vec<(u32, u8)> =
            (0..50_000).map(|_| (rng.random_range(0..100_000), 1)).collect();
        left.sort();
        right.sort();

        assert_eq!(merged(&left, &right), expected(&left, &right));
        assert_eq!(merged(&right, &left), {
            let mut all: Vec<_> = right.iter().chain(&left).copied().collect();
            all.sort_by_key(|&(key, _)| key);
            all
        });
    }
}
