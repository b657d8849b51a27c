//! Stable parallel LSD radix sort of `(key, value)` pairs.
//!
//! Every pass sorts by one 8-bit digit of the key. The input is cut into blocks, each block
//! computes a histogram of its digits in parallel, the histograms are turned into per-block write
//! offsets (bucket-major, block-minor, which is what makes the pass stable) and finally every
//! block scatters its pairs to their offsets in parallel.

use rayon::prelude::*;

use super::DisjointWriter;
use crate::OutputElement;

const DIGIT_BITS: u32 = 8;
const NUM_BUCKETS: usize = 1 << DIGIT_BITS;
const BLOCK_LEN: usize = 1 << 14;

/// Sorts `pairs` stably by the lowest `key_bits` bits of their keys.
///
/// Higher key bits are expected to be zero.
pub(crate) fn radix_sort_pairs<O: OutputElement>(pairs: &mut Vec<(O, O)>, key_bits: u32) {
    debug_assert!(key_bits <= O::BITS);

    if pairs.len() <= 1 || key_bits == 0 {
        return;
    }

    let mut scratch = vec![(O::ZERO, O::ZERO); pairs.len()];
    let mut shift = 0;

    while shift < key_bits {
        counting_sort_pass(pairs, &mut scratch, shift);
        std::mem::swap(pairs, &mut scratch);
        shift += DIGIT_BITS;
    }
}

fn counting_sort_pass<O: OutputElement>(source: &[(O, O)], target: &mut [(O, O)], shift: u32) {
    let mask = O::from_index(NUM_BUCKETS - 1);
    let digit = |key: O| ((key >> shift as usize) & mask).index();

    let histograms: Vec<[usize; NUM_BUCKETS]> = source
        .par_chunks(BLOCK_LEN)
        .map(|block| {
            let mut histogram = [0; NUM_BUCKETS];
            for &(key, _) in block {
                histogram[digit(key)] += 1;
            }
            histogram
        })
        .collect();

    let mut offsets = histograms;
    let mut sum = 0;
    for bucket in 0..NUM_BUCKETS {
        for block_offsets in offsets.iter_mut() {
            let count = block_offsets[bucket];
            block_offsets[bucket] = sum;
            sum += count;
        }
    }

    let writer = DisjointWriter::new(target);

    source
        .par_chunks(BLOCK_LEN)
        .zip(offsets.into_par_iter())
        .for_each(|(block, mut block_offsets)| {
            for &pair in block {
                let bucket = digit(pair.0);
                // SAFETY: the offsets of all blocks and buckets partition the target into
                // disjoint ranges, and every block only writes into its own ranges
                unsafe { writer.write(block_offsets[bucket], pair) };
                block_offsets[bucket] += 1;
            }
        });
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    fn is_stably_sorted(original: &[(u64, u64)], sorted: &[(u64, u64)]) -> bool {
        let mut expected = original.to_vec();
        expected.sort_by_key(|&(key, _)| key);
        expected == sorted
    }

    #[test]
    fn empty_and_single() {
        let mut empty: Vec<(u32, u32)> = Vec::new();
        radix_sort_pairs(&mut empty, 8);
        assert!(empty.is_empty());

        let mut single = vec![(5u32, 0u32)];
        radix_sort_pairs(&mut single, 8);
        assert_eq!(single, vec![(5, 0)]);
    }

    #[test]
    fn small_keys_are_sorted_stably() {
        let original: Vec<(u64, u64)> = vec![(3, 0), (1, 1), (3, 2), (0, 3), (1, 4), (2, 5)];
        let mut pairs = original.clone();

        radix_sort_pairs(&mut pairs, 2);

        assert_eq!(pairs, vec![(0, 3), (1, 1), (1, 4), (2, 5), (3, 0), (3, 2)]);
    }

    #[test]
    fn wide_keys_over_many_blocks() {
        let mut rng = StdRng::seed_from_u64(17);
        let original: Vec<(u64, u64)> = (0..100_000)
            .map(|i| (rng.random_range(0..1u64 << 41), i))
            .collect();
        let mut pairs = original.clone();

        radix_sort_pairs(&mut pairs, 41);

        assert!(is_stably_sorted(&original, &pairs));
    }

    #[test]
    fn many_duplicates_stay_in_input_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let original: Vec<(u64, u64)> = (0..50_000).map(|i| (rng.random_range(0..4), i)).collect();
        let mut pairs = original.clone();

        radix_sort_pairs(&mut pairs, 2);

        assert!(is_stably_sorted(&original, &pairs));
    }

    #[test]
    fn full_width_keys() {
        let original: Vec<(u32, u32)> = vec![(u32::MAX, 0), (0, 1), (1 << 31, 2), (7, 3)];
        let mut pairs = original;

        radix_sort_pairs(&mut pairs, 32);

        assert_eq!(pairs, vec![(0, 1), (7, 3), (1 << 31, 2), (u32::MAX, 0)]);
    }
}
