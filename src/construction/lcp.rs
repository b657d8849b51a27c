//! LCP array reconstruction from the LCP array of the sample suffixes.
//!
//! Adjacent suffixes in the final order are compared directly for a few symbols. Only when that
//! prefix matches completely, both suffixes are shifted by at most two positions to a pair of
//! sample suffixes, whose LCP is known in whole triples from the recursion and answered by a range
//! minimum query over the sample LCP array.

use rayon::prelude::*;

use super::rmq::SparseTable;
use crate::OutputElement;

/// Number of symbols compared directly before falling back to the sample LCP.
const PROBE_LEN: usize = 16;

/// What is known about the LCPs of adjacent sample suffixes of one recursion level.
pub(crate) enum SampleLcp<O> {
    /// The sample suffixes were sorted by recursion, which also produced their LCP array, counted
    /// in triples.
    Recursive(SparseTable<O>),
    /// All sample triples were distinct and no recursion computed the LCPs. Two sample suffixes
    /// then never share a full triple, so this only ever answers 0. It is consulted after the
    /// direct probe, which resolves every pair that shares fewer than 16 symbols.
    Unresolved,
}

impl<O: OutputElement> SampleLcp<O> {
    /// LCP in triples of the sample suffixes at the (distinct) positions `rank_a` and `rank_b` of
    /// the sorted samples.
    fn between(&self, rank_a: usize, rank_b: usize) -> usize {
        match self {
            SampleLcp::Recursive(table) => {
                let (lo, hi) = if rank_a < rank_b {
                    (rank_a, rank_b)
                } else {
                    (rank_b, rank_a)
                };
                table.min(lo, hi - 1).index()
            }
            SampleLcp::Unresolved => 0,
        }
    }
}

/// Computes the LCP array of `suffix_array`, where `lcp[i]` belongs to the suffixes at `i` and
/// `i + 1`.
///
/// `s` is the padded text of the level and `rank` maps every sample position to its index in the
/// sorted samples plus 2.
pub(crate) fn reconstruct_lcp<O: OutputElement>(
    s: &[O],
    suffix_array: &[O],
    rank: &[O],
    sample_lcp: &SampleLcp<O>,
) -> Vec<O> {
    if suffix_array.len() < 2 {
        return Vec::new();
    }

    suffix_array
        .par_windows(2)
        .map(|pair| {
            let j = pair[0].index();
            let k = pair[1].index();

            // two distinct suffixes always differ at the latest at the terminal zero of the shorter
            // one, so this never reads past the padding
            if let Some(mismatch) = (0..PROBE_LEN).find(|&t| s[j + t] != s[k + t]) {
                return O::from_index(mismatch);
            }

            let shift = if j % 3 != 0 && k % 3 != 0 {
                0
            } else if j % 3 != 2 && k % 3 != 2 {
                1
            } else {
                2
            };

            let rank_j = rank[j + shift].index() - 2;
            let rank_k = rank[k + shift].index() - 2;
            let matched = 3 * sample_lcp.between(rank_j, rank_k);

            let (j, k) = (j + shift + matched, k + shift + matched);
            let tail = if s[j] != s[k] {
                0
            } else if s[j + 1] != s[k + 1] {
                1
            } else {
                2
            };

            O::from_index(shift + matched + tail)
        })
        .collect()
}
