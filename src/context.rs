/*!
 * Use a [`Context`] to reuse a thread pool across multiple runs of the algorithm.
 *
 * Without a context, a multi-threaded construction with a fixed [`ThreadCount`] builds a fresh
 * [`rayon::ThreadPool`] for every run, and a single-threaded construction builds a pool with one
 * thread. When many (small) texts are processed, it can be worthwhile to build the pool once:
 *
 * ```
 * use skewsa::{SuffixArrayConstruction, ThreadCount, context::Context};
 *
 * let context = Context::new_multi_threaded(ThreadCount::fixed(2)).unwrap();
 *
 * for text in [b"abracadabra".as_slice(), b"mississippi", b"banana"] {
 *     let res = SuffixArrayConstruction::for_text(text)
 *         .in_owned_buffer32()
 *         .multi_threaded(ThreadCount::fixed(2))
 *         .with_context(&context)
 *         .run()
 *         .unwrap();
 *
 *     assert_eq!(res.suffix_array().len(), text.len());
 * }
 * ```
 *
 * The thread count of the context has to match the thread count of the construction
 * that uses it.
 */

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{SkewError, ThreadCount};

/// Owner of a thread pool that is used by the constructions it is passed to.
#[derive(Debug)]
pub struct Context {
    pool: ThreadPool,
    thread_count: ThreadCount,
}

impl Context {
    pub fn new_single_threaded() -> Result<Self, SkewError> {
        Self::new_multi_threaded(ThreadCount::fixed(1))
    }

    pub fn new_multi_threaded(thread_count: ThreadCount) -> Result<Self, SkewError> {
        Ok(Self {
            pool: build_thread_pool(thread_count)?,
            thread_count,
        })
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn thread_count(&self) -> ThreadCount {
        self.thread_count
    }

    pub(crate) fn pool(&self) -> &ThreadPool {
        &self.pool
    }
}

pub(crate) fn build_thread_pool(thread_count: ThreadCount) -> Result<ThreadPool, SkewError> {
    ThreadPoolBuilder::new()
        .num_threads(thread_count.into_rayon_convention())
        .thread_name(|index| format!("skewsa-{index}"))
        .build()
        .map_err(SkewError::from)
}
