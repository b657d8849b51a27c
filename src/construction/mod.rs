//! The parallel skew (DC3) algorithm and the building blocks it needs.
//!
//! Nothing in here is public. The builder in [`crate::suffix_array`] validates the configuration and
//! calls [`construct`], which runs the whole algorithm on the current rayon thread pool.

pub(crate) mod alphabet;
pub(crate) mod lcp;
pub(crate) mod merge;
pub(crate) mod radix_sort;
pub(crate) mod rmq;
pub(crate) mod scan;
pub(crate) mod skew;

use std::marker::PhantomData;

use crate::{InputElement, OutputElement, RadixStrategy, SkewError, instrumentation::Instrumentation};

/// Builds the suffix array of `text` into the first `text.len()` entries of `suffix_array`, and the
/// LCP array if requested.
pub(crate) fn construct<I: InputElement, O: OutputElement>(
    text: &[I],
    suffix_array: &mut [O],
    compute_lcp: bool,
    radix_strategy: RadixStrategy,
    instrumentation: &mut dyn Instrumentation,
) -> Result<Option<Vec<O>>, SkewError> {
    let text_len = text.len();
    let suffix_array = &mut suffix_array[..text_len];

    // degenerate sizes never reach the index arithmetic of the recursion
    match text_len {
        0 => return Ok(compute_lcp.then(Vec::new)),
        1 => {
            suffix_array[0] = O::ZERO;
            return Ok(compute_lcp.then(Vec::new));
        }
        _ => {}
    }

    let mapped = alphabet::map_text::<I, O>(text)?;

    log::debug!(
        "constructing suffix array: text len {}, alphabet size {}, {}-bit output, lcp: {}",
        text_len,
        mapped.alphabet_size,
        O::BITS,
        compute_lcp
    );

    let mut engine = skew::SkewEngine::new(radix_strategy, instrumentation);
    let lcp = engine.sort_level(
        mapped.symbols,
        text_len,
        mapped.alphabet_size,
        compute_lcp,
        suffix_array,
    );

    Ok(lcp)
}

/// Number of bits needed to represent every value in `[0, bound)`.
pub(crate) fn bits_for_bound(bound: usize) -> u32 {
    usize::BITS - bound.saturating_sub(1).leading_zeros()
}

/// A view of a slice that several parallel tasks write into at pairwise distinct indices.
///
/// This is the scatter step of the radix sort, the placement of names into the reduced text
/// and the placement of ranks. Every index is written by exactly one task, which the callers
/// guarantee by construction (the written indices come from a permutation or from disjoint
/// bucket ranges).
#[derive(Debug)]
pub(crate) struct DisjointWriter<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

impl<T> Clone for DisjointWriter<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DisjointWriter<'_, T> {}

// SAFETY: the writer only hands out writes of `T` values to distinct indices, which is the same
// as sending disjoint `&mut T` to other threads.
unsafe impl<T: Send> Send for DisjointWriter<'_, T> {}
unsafe impl<T: Send> Sync for DisjointWriter<'_, T> {}

impl<'a, T> DisjointWriter<'a, T> {
    pub(crate) fn new(slice: &'a mut [T]) -> Self {
        Self {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// `index` has to be in bounds, and no other write to it may happen during the lifetime of
    /// this writer.
    #[inline(always)]
    pub(crate) unsafe fn write(&self, index: usize, value: T) {
        debug_assert!(index < self.len, "index {index} out of bounds for length {}", self.len);
        // SAFETY: the caller guarantees that the index is in bounds and exclusively accessed
        unsafe { self.ptr.add(index).write(value) }
    }
}
