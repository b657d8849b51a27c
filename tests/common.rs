#![allow(unused)]

use num_traits::NumCast;
use rand::{Rng, SeedableRng, rngs::StdRng};
use skewsa::{InputElement, OutputElement};

pub fn is_suffix_array<I: InputElement, O: OutputElement>(
    text: &[I],
    maybe_suffix_array: &[O],
) -> bool {
    if text.is_empty() && maybe_suffix_array.is_empty() {
        return true;
    }

    if text.len() != maybe_suffix_array.len() || !is_permutation(maybe_suffix_array) {
        return false;
    }

    for indices in maybe_suffix_array.windows(2) {
        let previous = <usize as NumCast>::from(indices[0]).unwrap();
        let current = <usize as NumCast>::from(indices[1]).unwrap();

        if text[previous..] > text[current..] {
            return false;
        }
    }

    true
}

pub fn is_permutation<O: OutputElement>(values: &[O]) -> bool {
    let mut seen = vec![false; values.len()];

    for &value in values {
        let index = <usize as NumCast>::from(value).unwrap();

        if index >= values.len() || seen[index] {
            return false;
        }

        seen[index] = true;
    }

    true
}

pub fn is_lcp_array<I: InputElement, O: OutputElement>(
    text: &[I],
    suffix_array: &[O],
    lcp: &[O],
) -> bool {
    if lcp.len() != suffix_array.len().saturating_sub(1) {
        return false;
    }

    for (i, indices) in suffix_array.windows(2).enumerate() {
        let first = <usize as NumCast>::from(indices[0]).unwrap();
        let second = <usize as NumCast>::from(indices[1]).unwrap();

        let lcp_value = <usize as NumCast>::from(lcp[i]).unwrap();

        if longest_common_prefix(&text[first..], &text[second..]) != lcp_value {
            return false;
        }
    }

    true
}

pub fn longest_common_prefix<I: InputElement>(t1: &[I], t2: &[I]) -> usize {
    std::iter::zip(t1, t2).take_while(|(c1, c2)| c1 == c2).count()
}

pub fn random_text(len: usize, alphabet_size: u8, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(0..alphabet_size)).collect()
}

pub fn repeated_block(block_len: usize, len: usize, seed: u64) -> Vec<u8> {
    let block = random_text(block_len, 4, seed);
    block.iter().copied().cycle().take(len).collect()
}
