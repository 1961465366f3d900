//! Fixed-capacity FIFO buffer for concurrent producers and consumers.
//!
//! [`BoundedBuffer<T>`] holds up to a fixed number of elements and hands
//! them out in arrival order. It never blocks: producing into a full buffer
//! fails with [`Overflow`], consuming from an empty one fails with
//! [`Underflow`].
//!
//! ```
//! use circbuf::{BoundedBuffer, CircularBuffer};
//!
//! let buf = BoundedBuffer::<i32>::new(3);
//! buf.produce(1).unwrap();
//! buf.produce(2).unwrap();
//! assert_eq!(buf.consume().unwrap(), 1);
//! assert_eq!(buf.count(), 1);
//! ```
//!
//! # Bulk Operations
//!
//! The [`CircularBuffer`] trait provides two bulk helpers on top of
//! `produce` and `consume`:
//!
//! - `produce_all()`: produces from an iterator until the buffer is full,
//!   returning how many items went in
//! - `consume_all()`: drains the buffer through a callback; elements the
//!   callback produces are drained as well
//!
//! ```
//! use circbuf::{BoundedBuffer, CircularBuffer};
//!
//! let buf = BoundedBuffer::<String>::new(2);
//! assert_eq!(buf.produce_all(["one", "two", "three"]), 2);
//!
//! let mut seen = Vec::new();
//! buf.consume_all(|item| seen.push(item)).unwrap();
//! assert_eq!(seen, vec!["one", "two"]);
//! ```
//!
//! # Thread Safety
//!
//! `BoundedBuffer<T>` is `Send + Sync` for `T: Send` and `Clone` shares the
//! underlying buffer via `Arc`. Produce and consume are serialized through a
//! [`SharedLock`]; by default one lock is shared by every buffer with the
//! same element type. The state queries and `clear` are not synchronized.

mod bounded_buffer;
mod contract;
mod error;
mod lock;

pub use bounded_buffer::BoundedBuffer;
pub use contract::CircularBuffer;
pub use error::{BufferError, Overflow, Underflow};
pub use lock::SharedLock;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BoundedBuffer<i32>>();
        assert_send_sync::<BoundedBuffer<String>>();
        assert_send_sync::<SharedLock>();
    }

    #[test]
    fn test_buffer_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<BoundedBuffer<i32>>();
        assert_clone::<SharedLock>();
    }

    #[test]
    fn test_errors_are_send_sync() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<Overflow<String>>();
        assert_error::<Underflow>();
        assert_error::<BufferError>();
    }
}
