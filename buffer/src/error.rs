//! Error types for buffer operations.

use std::error::Error;
use std::fmt;

const OVERFLOW_MESSAGE: &str = "buffer: full, couldn't add element";
const UNDERFLOW_MESSAGE: &str = "buffer: empty, couldn't remove element";

/// Returned by `produce` when the buffer is full.
///
/// The rejected item is handed back to the caller, so a failed produce
/// never loses data. Use [`Overflow::into_inner`] to recover it.
pub struct Overflow<T> {
    item: T,
}

impl<T> Overflow<T> {
    pub(crate) fn new(item: T) -> Self {
        Overflow { item }
    }

    /// Returns a reference to the item that could not be added.
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Consumes the error, returning the item that could not be added.
    pub fn into_inner(self) -> T {
        self.item
    }
}

impl<T> fmt::Debug for Overflow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Overflow(..)")
    }
}

impl<T> fmt::Display for Overflow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(OVERFLOW_MESSAGE)
    }
}

impl<T> Error for Overflow<T> {}

/// Returned by `consume` when the buffer is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{}", UNDERFLOW_MESSAGE)]
pub struct Underflow;

/// Either failure kind, for callers that mix produce and consume under `?`.
///
/// Converting an [`Overflow`] into a `BufferError` drops the rejected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// Attempted to produce into a full buffer.
    #[error("{}", OVERFLOW_MESSAGE)]
    Overflow,
    /// Attempted to consume from an empty buffer.
    #[error("{}", UNDERFLOW_MESSAGE)]
    Underflow,
}

impl<T> From<Overflow<T>> for BufferError {
    fn from(_: Overflow<T>) -> Self {
        BufferError::Overflow
    }
}

impl From<Underflow> for BufferError {
    fn from(_: Underflow) -> Self {
        BufferError::Underflow
    }
}
