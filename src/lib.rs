/*!
 * Parallel construction of [suffix arrays] and [LCP arrays] with the skew (DC3) algorithm.
 *
 * The algorithm runs in linear work and polylogarithmic depth. All parallel steps are executed on
 * [`rayon`] thread pools.
 *
 * For quick use, there are the two functions [`build_suffix_array`] and [`build_suffix_array_with_lcp`]:
 * ```
 * let (suffix_array, lcp) = skewsa::build_suffix_array_with_lcp(b"banana").unwrap();
 *
 * assert_eq!(suffix_array, vec![5, 3, 1, 0, 4, 2]);
 * assert_eq!(lcp, vec![1, 3, 0, 0, 2]);
 * ```
 *
 * Full control over the output element type, the output buffer and the thread pool is given by the
 * builder-like [`SuffixArrayConstruction`]:
 * ```
 * use skewsa::SuffixArrayConstruction;
 *
 * let res = SuffixArrayConstruction::for_text(b"mississippi".as_slice())
 *     .in_owned_buffer32()
 *     .single_threaded()
 *     .run()
 *     .unwrap();
 *
 * assert_eq!(res.into_vec(), vec![10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2]);
 * ```
 *
 * See [`suffix_array`] for details about the conventions of the output.
 *
 * The library logs the parameters of every construction and recursion level via the [`log`] facade on
 * the `debug` and `trace` levels.
 *
 * [suffix arrays]: https://en.wikipedia.org/wiki/Suffix_array
 * [LCP arrays]: https://en.wikipedia.org/wiki/LCP_array
 */

mod construction;
mod owned_or_borrowed;

pub mod context;
pub mod error;
pub mod instrumentation;
pub mod suffix_array;
pub mod type_model;
pub mod typestate;

#[doc(inline)]
pub use error::SkewError;

#[doc(inline)]
pub use suffix_array::SuffixArrayConstruction;

#[doc(inline)]
pub use type_model::{InputElement, OutputElement};

/// Builds the suffix array of `text` on the current rayon thread pool.
pub fn build_suffix_array<I: InputElement>(text: &[I]) -> Result<Vec<usize>, SkewError> {
    SuffixArrayConstruction::for_text(text)
        .in_owned_buffer::<usize>()
        .multi_threaded(ThreadCount::rayon_default())
        .run()
        .map(|res| res.into_vec())
}

/// Builds the suffix array and the LCP array of `text` on the current rayon thread pool.
///
/// The LCP array has `text.len() - 1` entries, or none for the empty text.
pub fn build_suffix_array_with_lcp<I: InputElement>(
    text: &[I],
) -> Result<(Vec<usize>, Vec<usize>), SkewError> {
    SuffixArrayConstruction::for_text(text)
        .in_owned_buffer::<usize>()
        .multi_threaded(ThreadCount::rayon_default())
        .with_lcp()
        .run()
        .map(|res| res.into_vecs())
}

/// The number of threads of a multi-threaded construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadCount {
    /// Runs on the rayon thread pool of the caller, usually the global one.
    RayonDefault,
    Fixed { value: u16 },
}

impl ThreadCount {
    /// # Panics
    ///
    /// If `thread_count` is 0.
    pub const fn fixed(thread_count: u16) -> Self {
        if thread_count == 0 {
            panic!("Fixed thread count cannot be 0");
        }

        Self::Fixed {
            value: thread_count,
        }
    }

    pub const fn rayon_default() -> Self {
        Self::RayonDefault
    }

    /// 0 lets rayon choose the number of threads of a new pool.
    pub(crate) fn into_rayon_convention(self) -> usize {
        match self {
            Self::RayonDefault => 0,
            Self::Fixed { value } => value.into(),
        }
    }
}

/// How the sample triples of every recursion level are radix sorted.
///
/// The result does not depend on the strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RadixStrategy {
    /// Packs the three symbols of a triple into one key and sorts once, if the key fits into the
    /// output element type. Otherwise sorts in three passes.
    #[default]
    PackedWhenPossible,
    /// Always sorts by the third, second and first symbol in three stable passes.
    AlwaysThreePass,
}

mod sealed {
    pub trait Sealed {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convenience_functions() {
        assert_eq!(build_suffix_array::<u8>(&[]).unwrap(), Vec::<usize>::new());
        assert_eq!(build_suffix_array(b"x").unwrap(), vec![0]);
        assert_eq!(build_suffix_array(b"aaaa").unwrap(), vec![3, 2, 1, 0]);

        let (suffix_array, lcp) = build_suffix_array_with_lcp(b"aaaa").unwrap();
        assert_eq!(suffix_array, vec![3, 2, 1, 0]);
        assert_eq!(lcp, vec![1, 2, 3]);
    }

    #[test]
    fn thread_counts_in_rayon_convention() {
        assert_eq!(ThreadCount::rayon_default(), ThreadCount::RayonDefault);
        assert_eq!(ThreadCount::RayonDefault.into_rayon_convention(), 0);
        assert_eq!(ThreadCount::fixed(3), ThreadCount::Fixed { value: 3 });
        assert_eq!(ThreadCount::fixed(3).into_rayon_convention(), 3);
    }

    #[test]
    #[should_panic]
    fn zero_fixed_threads() {
        let _ = ThreadCount::fixed(0);
    }
}
