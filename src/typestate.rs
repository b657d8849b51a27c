/*!
 * Typestate model for builder APIs, most likely not relevant to you.
 */

use either::Either;

use crate::{OutputElement, sealed::Sealed};

pub enum Undecided {}

impl Sealed for Undecided {}

pub trait ParallelismOrUndecided: Sealed {}

impl ParallelismOrUndecided for Undecided {}

impl<P: Parallelism> ParallelismOrUndecided for P {}

/// Decision about whether the construction runs on a single thread or on a rayon thread pool.
pub trait Parallelism: Sealed {}

pub enum SingleThreaded {}

impl Sealed for SingleThreaded {}

impl Parallelism for SingleThreaded {}

pub enum MultiThreaded {}

impl Sealed for MultiThreaded {}

impl Parallelism for MultiThreaded {}

pub trait OutputElementOrUndecided: Sealed {}

impl OutputElementOrUndecided for Undecided {}

impl<O: OutputElement> OutputElementOrUndecided for O {}

pub trait BufferModeOrUndecided: Sealed {}

impl BufferModeOrUndecided for Undecided {}

/// Decision about whether an owned [`Vec`]-based buffer or a user-provided slice-based buffer is used.
pub trait BufferMode: Sealed {
    type Buffer<'a, T: 'a>;

    fn either_to_buffer<'a, T: std::fmt::Debug>(
        either_: Either<Vec<T>, &'a mut [T]>,
    ) -> Self::Buffer<'a, T>;
}

impl<B: BufferMode> BufferModeOrUndecided for B {}

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct BorrowedBuffer {}

impl Sealed for BorrowedBuffer {}

impl BufferMode for BorrowedBuffer {
    type Buffer<'a, T: 'a> = &'a mut [T];

    fn either_to_buffer<'a, T: std::fmt::Debug>(
        either_: Either<Vec<T>, &'a mut [T]>,
    ) -> Self::Buffer<'a, T> {
        either_.unwrap_right()
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct OwnedBuffer {}

impl Sealed for OwnedBuffer {}

impl BufferMode for OwnedBuffer {
    type Buffer<'a, T: 'a> = Vec<T>;

    fn either_to_buffer<'a, T: std::fmt::Debug>(
        either_: Either<Vec<T>, &'a mut [T]>,
    ) -> Self::Buffer<'a, T> {
        either_.unwrap_left()
    }
}

/// Decision about whether the LCP array is computed together with the suffix array.
pub trait LcpMode: Sealed {}

pub enum WithoutLcp {}

impl Sealed for WithoutLcp {}

impl LcpMode for WithoutLcp {}

pub enum WithLcp {}

impl Sealed for WithLcp {}

impl LcpMode for WithLcp {}
