//! Error types shared by the engine and the stage executors.

use thiserror::Error;

/// Errors surfaced by engine construction and transform calls.
///
/// None of these are transient: the transform is deterministic, so a failed
/// call will fail identically if repeated without fixing the cause.
#[derive(Debug, Error)]
pub enum FftError {
    /// The requested transform size cannot be handled by this engine.
    ///
    /// Raised at construction only. The instance is never created, so there
    /// is nothing to retry; reconstruct with a valid size.
    #[error("invalid transform size {n}: {reason}")]
    InvalidSize {
        /// The rejected size.
        n: usize,
        /// Why the size was rejected.
        reason: &'static str,
    },

    /// An input or output buffer length differs from the engine's configured
    /// size. Raised per call; the scratch state is left untouched.
    #[error("buffer of length {actual} does not match the engine size {expected}")]
    SizeMismatch {
        /// The size the engine was constructed with.
        expected: usize,
        /// The length of the offending buffer.
        actual: usize,
    },

    /// The parallel execution backend failed to prepare or run a stage.
    #[error("compute substrate failure: {context}")]
    ComputeSubstrateFailure {
        /// What the backend was doing when it failed.
        context: String,
        /// The underlying backend error, when one exists.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl FftError {
    pub(crate) fn substrate<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ComputeSubstrateFailure {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}
