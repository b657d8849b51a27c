use thiserror::Error;

/// Errors that can occur during the construction of a suffix array.
///
/// Running out of memory is not represented here. Like every allocation failure in Rust,
/// it aborts the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkewError {
    /// The text together with its padding cannot be indexed by the chosen output element type.
    #[error("text of length {len} is too long for the chosen output type (max allowed len: {max})")]
    TextTooLong { len: usize, max: usize },

    /// A symbol does not fit into the chosen output element type after reserving 0 for the sentinel.
    #[error("symbol {symbol} does not fit into the chosen output type after reserving the sentinel")]
    SymbolOutOfRange { symbol: u64 },

    /// The dedicated thread pool for this construction could not be created.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

impl From<rayon::ThreadPoolBuildError> for SkewError {
    fn from(error: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(error.to_string())
    }
}
