use num_traits::AsPrimitive;
use rayon::prelude::*;

use crate::{InputElement, OutputElement, SkewError};

/// Number of zero symbols appended to every text of the recursion.
pub(crate) const PADDING: usize = 3;

pub(crate) struct MappedText<O> {
    /// The shifted symbols followed by [`PADDING`] zeros.
    pub(crate) symbols: Vec<O>,
    /// One more than the largest shifted symbol.
    pub(crate) alphabet_size: usize,
}

/// Shifts every symbol by one, so that 0 is free to be used as the sentinel that is smaller than
/// every symbol of the text.
pub(crate) fn map_text<I: InputElement, O: OutputElement>(
    text: &[I],
) -> Result<MappedText<O>, SkewError> {
    let max_len = O::max_text_len();
    if text.len() > max_len {
        return Err(SkewError::TextTooLong {
            len: text.len(),
            max: max_len,
        });
    }

    let max_symbol: u64 = text
        .par_iter()
        .map(|&c| AsPrimitive::<u64>::as_(c))
        .reduce(|| 0, u64::max);

    // the shifted maximum and the alphabet size derived from it both have to be representable
    let max_output: u64 = <O as num_traits::ToPrimitive>::to_u64(&O::MAX).unwrap_or(u64::MAX);
    if max_symbol >= max_output - 1 || max_symbol.saturating_add(2) > usize::MAX as u64 {
        return Err(SkewError::SymbolOutOfRange { symbol: max_symbol });
    }

    let mut symbols: Vec<O> = Vec::with_capacity(text.len() + PADDING);
    symbols.par_extend(
        text.par_iter()
            .map(|&c| O::from_symbol(AsPrimitive::<u64>::as_(c) + 1)),
    );
    symbols.extend([O::ZERO; PADDING]);

    let alphabet_size = symbols
        .par_iter()
        .map(|&c| c.index())
        .reduce(|| 0, usize::max)
        + 1;

    Ok(MappedText {
        symbols,
        alphabet_size,
    })
}
