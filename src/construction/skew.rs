//! One level of the skew algorithm.
//!
//! Every level treats its text as if a terminal 0 followed it, so a text of length `len` has
//! `len + 1` positions. Positions that are not multiples of 3 are the samples. The samples are
//! sorted by their first three symbols and named. If the names are not distinct, the samples are
//! sorted by recursing on the text of their names. The positions that are multiples of 3 are then
//! sorted by their first symbol and the rank of the sample after them, and both sorted sequences
//! are merged. The terminal position is never part of the result.

use rayon::prelude::*;

use super::{
    DisjointWriter,
    alphabet::PADDING,
    bits_for_bound,
    lcp::{self, SampleLcp},
    merge::par_merge,
    radix_sort::radix_sort_pairs,
    rmq::SparseTable,
    scan::inclusive_scan,
};
use crate::{
    OutputElement, RadixStrategy,
    instrumentation::{Instrumentation, Phase},
};

/// Carries the configuration and the instrumentation through the recursion.
pub(crate) struct SkewEngine<'i> {
    radix_strategy: RadixStrategy,
    instrumentation: &'i mut dyn Instrumentation,
    depth: usize,
}

impl<'i> SkewEngine<'i> {
    pub(crate) fn new(
        radix_strategy: RadixStrategy,
        instrumentation: &'i mut dyn Instrumentation,
    ) -> Self {
        Self {
            radix_strategy,
            instrumentation,
            depth: 0,
        }
    }

    /// Writes the suffix array of the first `len` symbols of `s` into `out` and returns the LCP
    /// array if `want_lcp` is set.
    ///
    /// `s` has `len + PADDING` entries. The first `len` are in `1..alphabet_size`, the rest are 0.
    /// `len` has to be at least 2.
    pub(crate) fn sort_level<O: OutputElement>(
        &mut self,
        s: Vec<O>,
        len: usize,
        alphabet_size: usize,
        want_lcp: bool,
        out: &mut [O],
    ) -> Option<Vec<O>> {
        debug_assert!(len >= 2);
        debug_assert_eq!(s.len(), len + PADDING);
        debug_assert_eq!(out.len(), len);

        let n = len + 1;
        let n0 = (n + 2) / 3;
        let n1 = (n + 1) / 3;
        let n12 = n - n0;
        let bits = bits_for_bound(alphabet_size);

        log::debug!(
            "skew level {}: len {}, alphabet size {}, {} samples",
            self.depth,
            len,
            alphabet_size,
            n12
        );

        let (sorted_samples, sample_lcp) = self
            .sort_samples(&s, n1, n12, bits, alphabet_size, want_lcp)
            .into_parts(want_lcp);

        let rank = rank_samples(&sorted_samples, n);

        self.instrumentation.start(Phase::RadixSort);
        let sorted_mod0 = sort_mod0(&s, &sorted_samples, n, n0, n1, bits);
        self.instrumentation.stop(Phase::RadixSort);

        self.instrumentation.start(Phase::Merge);
        // the terminal is the smallest suffix and sits at the front of whichever side contains it
        let terminal_is_mod0 = usize::from(n % 3 == 1);
        let leq = |&i: &O, &j: &O| {
            let (i, j) = (i.index(), j.index());
            if i % 3 == 1 || j % 3 == 1 {
                (s[i], rank[i + 1]) <= (s[j], rank[j + 1])
            } else {
                (s[i], s[i + 1], rank[i + 2]) <= (s[j], s[j + 1], rank[j + 2])
            }
        };
        par_merge(
            &sorted_mod0[terminal_is_mod0..],
            &sorted_samples[1 - terminal_is_mod0..],
            out,
            &leq,
        );
        self.instrumentation.stop(Phase::Merge);

        let sample_lcp = sample_lcp?;

        self.instrumentation.start(Phase::Lcp);
        let lcp = lcp::reconstruct_lcp(&s, out, &rank, &sample_lcp);
        self.instrumentation.stop(Phase::Lcp);

        Some(lcp)
    }

    /// Sorts the sample positions, by their triples alone if those are distinct and by recursion
    /// otherwise.
    fn sort_samples<O: OutputElement>(
        &mut self,
        s: &[O],
        n1: usize,
        n12: usize,
        bits: u32,
        alphabet_size: usize,
        want_lcp: bool,
    ) -> SampleOrder<O> {
        self.instrumentation.start(Phase::RadixSort);
        let mut samples: Vec<(O, O)> = Vec::with_capacity(n12);
        samples.par_extend((0..n12).into_par_iter().map(|i| {
            let position = 1 + i + i / 2;
            (O::ZERO, O::from_index(position))
        }));
        self.sort_triples(s, &mut samples, bits, alphabet_size);
        let mut sorted: Vec<O> = samples.into_par_iter().map(|(_, p)| p).collect();
        self.instrumentation.stop(Phase::RadixSort);

        self.instrumentation.start(Phase::Naming);
        let triple = |p: O| {
            let p = p.index();
            (s[p], s[p + 1], s[p + 2])
        };
        let mut names: Vec<O> = (0..n12)
            .into_par_iter()
            .map(|i| {
                let is_new = i == 0 || triple(sorted[i]) != triple(sorted[i - 1]);
                O::from_index(usize::from(is_new))
            })
            .collect();
        let distinct = inclusive_scan(&mut names, O::ZERO, |a, b| a + b).index();
        self.instrumentation.stop(Phase::Naming);

        if distinct == n12 {
            log::debug!(
                "skew level {}: all {} sample triples distinct",
                self.depth,
                n12
            );
            return SampleOrder::DistinctTriples { sorted };
        }

        log::debug!(
            "skew level {}: {} distinct sample triples of {}, recursing",
            self.depth,
            distinct,
            n12
        );

        self.instrumentation.start(Phase::Naming);
        // mod 1 samples first, then mod 2 samples, each in text order
        let mut reduced = vec![O::ZERO; n12 + PADDING];
        let writer = DisjointWriter::new(&mut reduced);
        sorted
            .par_iter()
            .zip(names.par_iter())
            .for_each(|(&p, &name)| {
                let p = p.index();
                let slot = if p % 3 == 1 { p / 3 } else { p / 3 + n1 };
                // SAFETY: every sample position appears once and maps to its own slot
                unsafe { writer.write(slot, name) };
            });
        drop(names);
        self.instrumentation.stop(Phase::Naming);

        self.depth += 1;
        let lcp = self.sort_level(reduced, n12, distinct + 1, want_lcp, &mut sorted);
        self.depth -= 1;

        sorted.par_iter_mut().for_each(|slot| {
            let l = slot.index();
            let position = if l < n1 { 3 * l + 1 } else { 3 * (l - n1) + 2 };
            *slot = O::from_index(position);
        });

        SampleOrder::Recursed { sorted, lcp }
    }

    /// Sorts sample positions stably by the triple of symbols starting at them.
    fn sort_triples<O: OutputElement>(
        &self,
        s: &[O],
        samples: &mut Vec<(O, O)>,
        bits: u32,
        alphabet_size: usize,
    ) {
        let packed = self.radix_strategy == RadixStrategy::PackedWhenPossible && 3 * bits <= O::BITS;

        if packed {
            log::trace!(
                "radix sorting triples over alphabet size {} packed into one {}-bit key",
                alphabet_size,
                3 * bits
            );

            let (high, mid) = (2 * bits as usize, bits as usize);
            samples.par_iter_mut().for_each(|(key, p)| {
                let p = p.index();
                *key = (s[p] << high) | (s[p + 1] << mid) | s[p + 2];
            });
            radix_sort_pairs(samples, 3 * bits);
        } else {
            log::trace!(
                "radix sorting triples over alphabet size {} in three passes of {} bits",
                alphabet_size,
                bits
            );

            for offset in [2, 1, 0] {
                samples.par_iter_mut().for_each(|(key, p)| {
                    *key = s[p.index() + offset];
                });
                radix_sort_pairs(samples, bits);
            }
        }
    }
}

/// How the samples of one level ended up sorted.
enum SampleOrder<O> {
    /// Every sample triple is distinct, so sorting the triples sorted the sample suffixes.
    DistinctTriples { sorted: Vec<O> },
    /// The sample suffixes were sorted by recursing on the text of their names, which also
    /// produced their LCP array if it was requested.
    Recursed { sorted: Vec<O>, lcp: Option<Vec<O>> },
}

impl<O: OutputElement> SampleOrder<O> {
    fn into_parts(self, want_lcp: bool) -> (Vec<O>, Option<SampleLcp<O>>) {
        match self {
            SampleOrder::DistinctTriples { sorted } => {
                (sorted, want_lcp.then_some(SampleLcp::Unresolved))
            }
            SampleOrder::Recursed { sorted, lcp } => (
                sorted,
                lcp.map(|lcp| SampleLcp::Recursive(SparseTable::new(lcp))),
            ),
        }
    }
}

/// `rank[p]` is the index of sample position `p` in the sorted samples plus 2. The position after
/// the terminal gets 1 and the one after that 0, which keeps every comparison of the merge in
/// bounds and orders them before everything else.
fn rank_samples<O: OutputElement>(sorted_samples: &[O], n: usize) -> Vec<O> {
    let mut rank = vec![O::ZERO; n + 3];
    rank[n] = O::from_index(1);

    let writer = DisjointWriter::new(&mut rank);
    sorted_samples.par_iter().enumerate().for_each(|(i, &p)| {
        // SAFETY: the sorted samples are distinct positions
        unsafe { writer.write(p.index(), O::from_index(i + 2)) };
    });

    rank
}

/// Sorts the positions that are multiples of 3 by their first symbol and the rank of the next
/// position. Because the mod 1 samples are already sorted, one stable pass over the first symbol
/// suffices.
fn sort_mod0<O: OutputElement>(
    s: &[O],
    sorted_samples: &[O],
    n: usize,
    n0: usize,
    n1: usize,
    bits: u32,
) -> Vec<O> {
    let mut mod0_candidates: Vec<(O, O)> = Vec::with_capacity(n0);

    // without a following sample, the last position has to go first to be ordered before all
    // others with the same symbol
    if n0 > n1 {
        mod0_candidates.push((s[n - 1], O::from_index(n - 1)));
    }

    mod0_candidates.par_extend(
        sorted_samples
            .par_iter()
            .filter(|p| p.index() % 3 == 1)
            .map(|&p| {
                let p = p.index() - 1;
                (s[p], O::from_index(p))
            }),
    );
    debug_assert_eq!(mod0_candidates.len(), n0);

    radix_sort_pairs(&mut mod0_candidates, bits);

    mod0_candidates.into_par_iter().map(|(_, p)| p).collect()
}
