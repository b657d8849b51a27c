use either::Either;

use std::marker::PhantomData;

use crate::typestate::BufferMode;

// Lets the construction be agnostic over whether the suffix array lives in a Vec or in a slice of
// the caller. `B` is OwnedBuffer for the Vec and BorrowedBuffer for the slice.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct OwnedOrBorrowed<'a, T, B> {
    pub(crate) buffer: Either<Vec<T>, &'a mut [T]>,
    pub(crate) _marker: PhantomData<B>,
}

impl<'a, T: std::fmt::Debug, B: BufferMode> OwnedOrBorrowed<'a, T, B> {
    pub(crate) fn into_inner(self) -> B::Buffer<'a, T> {
        B::either_to_buffer(self.buffer)
    }
}

impl<'a, T, B: BufferMode> OwnedOrBorrowed<'a, T, B> {
    /// Uses the borrowed slice if there is one, otherwise a fresh zeroed Vec of length `len`.
    pub(crate) fn borrowed_or_zeroed(opt: Option<&'a mut [T]>, len: usize) -> Self
    where
        T: Clone + Default,
    {
        let buffer = match opt {
            Some(borrowed) => Either::Right(borrowed),
            None => Either::Left(vec![T::default(); len]),
        };

        OwnedOrBorrowed {
            buffer,
            _marker: PhantomData,
        }
    }

    /// Cuts a borrowed buffer down to its first `len` entries.
    pub(crate) fn shorten_buffer_to(&mut self, len: usize) {
        match &mut self.buffer {
            Either::Left(owned) => {
                owned.truncate(len);
                owned.shrink_to_fit();
            }
            Either::Right(borrowed) => *borrowed = &mut std::mem::take(borrowed)[..len],
        }
    }
}
