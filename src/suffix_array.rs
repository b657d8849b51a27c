/*!
 * Construct the [suffix array] and optionally the LCP array for a text using [`SuffixArrayConstruction`].
 *
 * The construction is based on the skew (DC3) algorithm. It sorts the suffixes starting at positions
 * that are not multiples of 3 by recursion on a text of two thirds of the length, then sorts the
 * remaining suffixes by a single radix sort pass and merges both. Every step within a level of the
 * recursion runs in parallel on [`rayon`].
 *
 * The entry point to the API is the [`SuffixArrayConstruction`] builder-like struct. It is always
 * required to pass the input text, register the output element and make a decision about
 * parallelisation. Further configuration options include supplying an output buffer, computing the
 * LCP array, a [`context`], the [`RadixStrategy`](crate::RadixStrategy) and an
 * [`instrumentation`] collector.
 *
 * The following is a fully-configured example:
 * ```
 * use skewsa::{RadixStrategy, SuffixArrayConstruction, ThreadCount, context::Context};
 * use skewsa::instrumentation::Timings;
 *
 * let context = Context::new_multi_threaded(ThreadCount::fixed(2)).unwrap();
 * let mut timings = Timings::new();
 *
 * let text = b"banana".as_slice();
 * let mut my_suffix_array_buffer = vec![0u32; 10];
 *
 * let res = SuffixArrayConstruction::for_text(text)
 *     .in_borrowed_buffer(&mut my_suffix_array_buffer)
 *     .multi_threaded(ThreadCount::fixed(2))
 *     .with_lcp()
 *     .with_context(&context)
 *     .with_radix_strategy(RadixStrategy::AlwaysThreePass)
 *     .with_instrumentation(&mut timings)
 *     .run()
 *     .unwrap();
 *
 * assert_eq!(res.suffix_array(), &[5, 3, 1, 0, 4, 2]);
 * assert_eq!(res.lcp(), &[1, 3, 0, 0, 2]);
 * ```
 *
 * # Sentinel Convention and Suffix Array Length
 *
 * In the literature, the input texts to suffix array construction algorithms are often assumed to be
 * terminated by a unique, lexicographically smallest character. This library does not have this
 * requirement, but sorts suffixes as if such a character were present at the end of the text. A
 * suffix that is a prefix of another suffix is therefore the smaller one. The zero symbol (not ASCII
 * '0') is a regular symbol of the text. The resulting suffix array has the same length as the text,
 * the LCP array is one shorter (or empty for the empty text).
 *
 * When using a borrowed output buffer, it has to be at least as long as the text. Only its prefix of
 * the length of the text is written.
 *
 * # Output Element Types
 *
 * The suffix array can be stored in [`u32`], [`u64`] or [`usize`]. The same type is used for the
 * symbols of the internal recursion, so every symbol of the text plus one has to be representable by
 * it, as well as the text length plus a few positions of padding. Otherwise, the construction fails
 * with a [`SkewError`].
 *
 * [suffix array]: https://en.wikipedia.org/wiki/Suffix_array
 * [`context`]: super::context
 * [`instrumentation`]: super::instrumentation
 */

use std::marker::PhantomData;

use crate::{
    InputElement, OutputElement, RadixStrategy, SkewError, ThreadCount,
    construction,
    context::{self, Context},
    instrumentation::{Instrumentation, NoInstrumentation},
    owned_or_borrowed::OwnedOrBorrowed,
    typestate::{
        BorrowedBuffer, BufferMode, BufferModeOrUndecided, LcpMode, MultiThreaded,
        OutputElementOrUndecided, OwnedBuffer, Parallelism, ParallelismOrUndecided,
        SingleThreaded, Undecided, WithLcp, WithoutLcp,
    },
};

/// The main entry point of this library, for constructing suffix arrays and LCP arrays.
///
/// See [`suffix_array`](self) for details.
pub struct SuffixArrayConstruction<
    'r,
    's,
    't,
    I: InputElement,
    O: OutputElementOrUndecided,
    B: BufferModeOrUndecided,
    P: ParallelismOrUndecided,
    L: LcpMode = WithoutLcp,
> {
    text: &'t [I],
    suffix_array_buffer: Option<&'s mut [O]>,
    thread_count: ThreadCount,
    radix_strategy: RadixStrategy,
    context: Option<&'r Context>,
    instrumentation: Option<&'r mut (dyn Instrumentation + 'static)>,
    _marker: PhantomData<(B, P, L)>,
}

impl<
    'r,
    's,
    't,
    I: InputElement,
    O: OutputElementOrUndecided,
    B: BufferModeOrUndecided,
    P: ParallelismOrUndecided,
    L: LcpMode,
> SuffixArrayConstruction<'r, 's, 't, I, O, B, P, L>
{
    fn init(text: &'t [I]) -> Self {
        Self {
            text,
            suffix_array_buffer: None,
            thread_count: ThreadCount::fixed(1),
            radix_strategy: RadixStrategy::default(),
            context: None,
            instrumentation: None,
            _marker: PhantomData,
        }
    }

    fn into_other_marker_type<B2: BufferModeOrUndecided, P2: ParallelismOrUndecided, L2: LcpMode>(
        self,
    ) -> SuffixArrayConstruction<'r, 's, 't, I, O, B2, P2, L2> {
        SuffixArrayConstruction {
            text: self.text,
            suffix_array_buffer: self.suffix_array_buffer,
            thread_count: self.thread_count,
            radix_strategy: self.radix_strategy,
            context: self.context,
            instrumentation: self.instrumentation,
            _marker: PhantomData,
        }
    }
}

impl<'t, I: InputElement>
    SuffixArrayConstruction<'static, 'static, 't, I, Undecided, Undecided, Undecided>
{
    /// The first method to call.
    ///
    /// The text has to be shorter than the maximum value of the output element type you will choose.
    pub fn for_text(text: &'t [I]) -> Self {
        Self::init(text)
    }

    /// Provide a buffer to the library in which the suffix array will be stored.
    ///
    /// The buffer has to be at least as large as the text.
    pub fn in_borrowed_buffer<'s, O: OutputElement>(
        self,
        suffix_array_buffer: &'s mut [O],
    ) -> SuffixArrayConstruction<'static, 's, 't, I, O, BorrowedBuffer, Undecided> {
        SuffixArrayConstruction {
            suffix_array_buffer: Some(suffix_array_buffer),
            ..SuffixArrayConstruction::init(self.text)
        }
    }

    /// Inform the library of your desired output element type,
    /// if you want to obtain the suffix array in a [`Vec`].
    pub fn in_owned_buffer<O: OutputElement>(
        self,
    ) -> SuffixArrayConstruction<'static, 'static, 't, I, O, OwnedBuffer, Undecided> {
        SuffixArrayConstruction::init(self.text)
    }

    /// Inform the library that you want to obtain the suffix array in a [`Vec<u32>`].
    pub fn in_owned_buffer32(
        self,
    ) -> SuffixArrayConstruction<'static, 'static, 't, I, u32, OwnedBuffer, Undecided> {
        self.in_owned_buffer()
    }

    /// Inform the library that you want to obtain the suffix array in a [`Vec<u64>`].
    pub fn in_owned_buffer64(
        self,
    ) -> SuffixArrayConstruction<'static, 'static, 't, I, u64, OwnedBuffer, Undecided> {
        self.in_owned_buffer()
    }
}

impl<'s, 't, I: InputElement, O: OutputElement, B: BufferMode>
    SuffixArrayConstruction<'static, 's, 't, I, O, B, Undecided>
{
    /// Run on a single thread, which is useful when many small texts are processed in parallel by
    /// the caller.
    pub fn single_threaded(
        self,
    ) -> SuffixArrayConstruction<'static, 's, 't, I, O, B, SingleThreaded> {
        SuffixArrayConstruction {
            thread_count: ThreadCount::fixed(1),
            ..self.into_other_marker_type()
        }
    }

    /// Run on multiple threads.
    ///
    /// With [`ThreadCount::rayon_default`], the construction runs on the rayon thread pool of
    /// the caller, usually the global one. With a fixed thread count, a dedicated pool is built for
    /// the run, unless a [`Context`] is supplied.
    pub fn multi_threaded(
        self,
        thread_count: ThreadCount,
    ) -> SuffixArrayConstruction<'static, 's, 't, I, O, B, MultiThreaded> {
        SuffixArrayConstruction {
            thread_count,
            ..self.into_other_marker_type()
        }
    }
}

impl<'r, 's, 't, I: InputElement, O: OutputElement, B: BufferMode, P: Parallelism>
    SuffixArrayConstruction<'r, 's, 't, I, O, B, P, WithoutLcp>
{
    /// Additionally compute the LCP array.
    ///
    /// `lcp[i]` is the length of the longest common prefix of the suffixes at `suffix_array[i]`
    /// and `suffix_array[i + 1]`.
    pub fn with_lcp(self) -> SuffixArrayConstruction<'r, 's, 't, I, O, B, P, WithLcp> {
        self.into_other_marker_type()
    }
}

impl<'r, 's, 't, I: InputElement, O: OutputElement, B: BufferMode, P: Parallelism, L: LcpMode>
    SuffixArrayConstruction<'r, 's, 't, I, O, B, P, L>
{
    /// Uses a context object that allows reusing a thread pool across runs of the algorithm.
    ///
    /// The thread count of the context must be equal to the thread count of this object.
    ///
    /// See [`context`](super::context) for further details.
    pub fn with_context(self, context: &'r Context) -> Self {
        Self {
            context: Some(context),
            ..self
        }
    }

    /// Choose how the triples of symbols are radix sorted. Both strategies give the same result.
    pub fn with_radix_strategy(self, radix_strategy: RadixStrategy) -> Self {
        Self {
            radix_strategy,
            ..self
        }
    }

    /// Report the durations of the phases of the algorithm to a collector.
    ///
    /// See [`instrumentation`](super::instrumentation) for details.
    pub fn with_instrumentation(
        self,
        instrumentation: &'r mut (dyn Instrumentation + 'static),
    ) -> Self {
        Self {
            instrumentation: Some(instrumentation),
            ..self
        }
    }

    fn run_inner(
        self,
        compute_lcp: bool,
    ) -> Result<(OwnedOrBorrowed<'s, O, B>, Option<Vec<O>>, &'t [I]), SkewError> {
        safety_checks(
            self.text,
            self.suffix_array_buffer.as_deref(),
            self.context,
            self.thread_count,
        );

        let text = self.text;
        let text_len = text.len();
        let radix_strategy = self.radix_strategy;

        let mut suffix_array =
            OwnedOrBorrowed::<O, B>::borrowed_or_zeroed(self.suffix_array_buffer, text_len);
        let suffix_array_buffer: &mut [O] = &mut suffix_array.buffer;

        let mut no_instrumentation = NoInstrumentation;
        let instrumentation: &mut (dyn Instrumentation + 'static) = match self.instrumentation {
            Some(instrumentation) => instrumentation,
            None => &mut no_instrumentation,
        };

        let mut job = move || {
            construction::construct(
                text,
                suffix_array_buffer,
                compute_lcp,
                radix_strategy,
                instrumentation,
            )
        };

        let lcp = match self.context {
            Some(context) => context.pool().install(job)?,
            None if self.thread_count == ThreadCount::RayonDefault => job()?,
            None => context::build_thread_pool(self.thread_count)?.install(job)?,
        };

        suffix_array.shorten_buffer_to(text_len);

        Ok((suffix_array, lcp, text))
    }
}

impl<'r, 's, 't, I: InputElement, O: OutputElement, B: BufferMode, P: Parallelism>
    SuffixArrayConstruction<'r, 's, 't, I, O, B, P, WithoutLcp>
{
    /// Construct the suffix array for the given text.
    ///
    /// # Panics
    ///
    /// If any of the requirements of the methods called before are not met.
    ///
    /// # Returns
    ///
    /// An error or a type that bundles the suffix array with a reference to the text.
    pub fn run(self) -> Result<SuffixArrayWithText<'s, 't, I, O, B>, SkewError> {
        let (suffix_array, _, text) = self.run_inner(false)?;

        Ok(SuffixArrayWithText { suffix_array, text })
    }
}

impl<'r, 's, 't, I: InputElement, O: OutputElement, B: BufferMode, P: Parallelism>
    SuffixArrayConstruction<'r, 's, 't, I, O, B, P, WithLcp>
{
    /// Construct the suffix array and the LCP array for the given text.
    ///
    /// # Panics
    ///
    /// If any of the requirements of the methods called before are not met.
    pub fn run(self) -> Result<SuffixArrayWithLcp<'s, 't, I, O, B>, SkewError> {
        let (suffix_array, lcp, text) = self.run_inner(true)?;

        Ok(SuffixArrayWithLcp {
            suffix_array,
            lcp: lcp.unwrap_or_default(),
            text,
        })
    }
}

/// The read-only return type of a suffix array construction.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SuffixArrayWithText<'s, 't, I: InputElement, O: OutputElement, B: BufferMode> {
    pub(crate) suffix_array: OwnedOrBorrowed<'s, O, B>,
    pub(crate) text: &'t [I],
}

impl<'s, 't, I: InputElement, O: OutputElement, B: BufferMode>
    SuffixArrayWithText<'s, 't, I, O, B>
{
    pub fn suffix_array(&self) -> &[O] {
        &self.suffix_array.buffer
    }

    pub fn text(&self) -> &'t [I] {
        self.text
    }

    pub fn into_parts(self) -> (B::Buffer<'s, O>, &'t [I]) {
        (self.suffix_array.into_inner(), self.text)
    }
}

impl<'t, I: InputElement, O: OutputElement> SuffixArrayWithText<'static, 't, I, O, OwnedBuffer> {
    pub fn into_vec(self) -> Vec<O> {
        self.suffix_array.into_inner()
    }
}

/// The read-only return type of a suffix array construction with LCP array.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SuffixArrayWithLcp<'s, 't, I: InputElement, O: OutputElement, B: BufferMode> {
    pub(crate) suffix_array: OwnedOrBorrowed<'s, O, B>,
    pub(crate) lcp: Vec<O>,
    pub(crate) text: &'t [I],
}

impl<'s, 't, I: InputElement, O: OutputElement, B: BufferMode> SuffixArrayWithLcp<'s, 't, I, O, B> {
    pub fn suffix_array(&self) -> &[O] {
        &self.suffix_array.buffer
    }

    /// The LCP values of adjacent suffixes. It has one entry less than the suffix array.
    pub fn lcp(&self) -> &[O] {
        &self.lcp
    }

    pub fn text(&self) -> &'t [I] {
        self.text
    }

    pub fn into_parts(self) -> (B::Buffer<'s, O>, Vec<O>, &'t [I]) {
        (self.suffix_array.into_inner(), self.lcp, self.text)
    }
}

impl<'t, I: InputElement, O: OutputElement> SuffixArrayWithLcp<'static, 't, I, O, OwnedBuffer> {
    /// Returns the suffix array and the LCP array.
    pub fn into_vecs(self) -> (Vec<O>, Vec<O>) {
        (self.suffix_array.into_inner(), self.lcp)
    }
}

fn safety_checks<I: InputElement, O: OutputElement>(
    text: &[I],
    suffix_array_buffer: Option<&[O]>,
    context: Option<&Context>,
    thread_count: ThreadCount,
) {
    if let Some(buffer) = suffix_array_buffer {
        assert!(
            buffer.len() >= text.len(),
            "suffix_array_buffer must be at least as large as text"
        );
    }

    if let Some(context) = context {
        assert_eq!(
            context.thread_count(),
            thread_count,
            "context needs to have the same number of threads as this config"
        );
    }
}
