/*!
 * Element types for texts and suffix arrays, most likely not relevant to you.
 *
 * Texts can consist of any of the unsigned integer types. The suffix array is stored in one of
 * [`u32`], [`u64`] or [`usize`]. The same type is used internally as the symbol type of the
 * reduced texts of the recursion, because their alphabets are bounded by the text length.
 */

use num_traits::{AsPrimitive, PrimInt};

use crate::sealed::Sealed;

/// Types that can be used as symbols of the input text.
pub trait InputElement:
    Sealed + std::fmt::Debug + Copy + Ord + Send + Sync + AsPrimitive<u64>
{
    const ZERO: Self;
}

macro_rules! input_element_impl {
    ($($t:ty),*) => {
        $(
            impl Sealed for $t {}

            impl InputElement for $t {
                const ZERO: Self = 0;
            }
        )*
    };
}

input_element_impl!(u8, u16, u32, u64, usize);

/// Types that can be used for the suffix array and LCP array.
pub trait OutputElement:
    Sealed + std::fmt::Debug + std::fmt::Display + PrimInt + Default + Send + Sync + 'static
{
    const ZERO: Self;
    const MAX: Self;
    const BITS: u32;

    /// Conversion from an index. Callers guarantee that the value is representable.
    fn from_index(value: usize) -> Self;

    /// Conversion from a mapped text symbol. Callers guarantee that the value is representable.
    fn from_symbol(value: u64) -> Self;

    fn index(self) -> usize;

    /// The largest text length for which every intermediate value of the construction fits.
    fn max_text_len() -> usize {
        // the text is padded by a terminal position and three zeros
        <Self as num_traits::ToPrimitive>::to_usize(&Self::MAX)
            .unwrap_or(usize::MAX)
            .saturating_sub(4)
    }
}

macro_rules! output_element_impl {
    ($($t:ty),*) => {
        $(
            impl OutputElement for $t {
                const ZERO: Self = 0;
                const MAX: Self = <$t>::MAX;
                const BITS: u32 = <$t>::BITS;

                #[inline(always)]
                fn from_index(value: usize) -> Self {
                    value as $t
                }

                #[inline(always)]
                fn from_symbol(value: u64) -> Self {
                    value as $t
                }

                #[inline(always)]
                fn index(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

output_element_impl!(u32, u64, usize);
