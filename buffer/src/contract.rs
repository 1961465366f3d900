//! The capability contract implemented by fixed-capacity FIFO buffers.

use tracing::debug;

use crate::error::{Overflow, Underflow};

/// A fixed-capacity FIFO buffer shared by producers and consumers.
///
/// `produce` and `consume` never wait: they fail immediately with
/// [`Overflow`] or [`Underflow`] when the buffer is full or empty.
///
/// # Synchronization
///
/// Implementations synchronize `produce` and `consume`. The state queries
/// (`count`, `is_empty`, `is_full`) and `clear` are not synchronized with
/// them: a query may observe a value that is already stale, and calling
/// `clear` while another thread produces or consumes may lose the clear or
/// the other operation's effect. Use the queries for diagnostics only, and
/// only call `clear` when no other thread is using the buffer.
pub trait CircularBuffer<T> {
    /// Returns the fixed maximum number of elements.
    fn capacity(&self) -> usize;

    /// Returns the number of elements currently in the buffer.
    fn count(&self) -> usize;

    /// Returns true if the buffer holds no elements.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns true if no further element can be produced.
    ///
    /// A zero-capacity buffer is always full (and always empty).
    fn is_full(&self) -> bool {
        self.count() >= self.capacity()
    }

    /// Drops the logical contents, leaving the buffer empty.
    fn clear(&self);

    /// Appends `item` at the tail.
    ///
    /// Fails with [`Overflow`], carrying `item` back, when the buffer is full.
    fn produce(&self, item: T) -> Result<(), Overflow<T>>;

    /// Removes and returns the element at the head.
    ///
    /// Fails with [`Underflow`] when the buffer is empty.
    fn consume(&self) -> Result<T, Underflow>;

    /// Produces every item of `source` in order, stopping at the first
    /// overflow.
    ///
    /// Returns the number of items produced. The item that overflowed is
    /// dropped and the rest of the iterator is not advanced; pass
    /// `iter.by_ref()` to keep using it afterwards.
    fn produce_all<I>(&self, source: I) -> usize
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: Into<T>,
    {
        let mut produced = 0;
        for item in source {
            if self.produce(item.into()).is_err() {
                debug!(produced, "circbuf: produce_all stopped, buffer full");
                return produced;
            }
            produced += 1;
        }
        produced
    }

    /// Consumes elements until the buffer is empty, calling `action` with
    /// each one in FIFO order.
    ///
    /// `action` may produce into this buffer; those elements are drained
    /// too before this returns. If `action` keeps producing, this never
    /// returns. Returns the number of elements passed to `action`.
    ///
    /// # Errors
    ///
    /// Returns [`Underflow`] if another thread empties the buffer between
    /// the emptiness check and the consume.
    fn consume_all<F>(&self, mut action: F) -> Result<usize, Underflow>
    where
        Self: Sized,
        F: FnMut(T),
    {
        let mut consumed = 0;
        while !self.is_empty() {
            action(self.consume()?);
            consumed += 1;
        }
        debug!(consumed, "circbuf: consume_all drained buffer");
        Ok(consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    struct Local<T> {
        items: RefCell<VecDeque<T>>,
        capacity: usize,
    }

    impl<T> Local<T> {
        fn new(capacity: usize) -> Self {
            Local {
                items: RefCell::new(VecDeque::new()),
                capacity,
            }
        }
    }

    impl<T> CircularBuffer<T> for Local<T> {
        fn capacity(&self) -> usize {
            self.capacity
        }

        fn count(&self) -> usize {
            self.items.borrow().len()
        }

        fn clear(&self) {
            self.items.borrow_mut().clear();
        }

        fn produce(&self, item: T) -> Result<(), Overflow<T>> {
            if self.is_full() {
                return Err(Overflow::new(item));
            }
            self.items.borrow_mut().push_back(item);
            Ok(())
        }

        fn consume(&self) -> Result<T, Underflow> {
            self.items.borrow_mut().pop_front().ok_or(Underflow)
        }
    }

    #[test]
    fn test_provided_state_queries() {
        let buf = Local::<i32>::new(2);
        assert!(buf.is_empty());
        assert!(!buf.is_full());
        buf.produce(1).unwrap();
        buf.produce(2).unwrap();
        assert!(!buf.is_empty());
        assert!(buf.is_full());
    }

    #[test]
    fn test_produce_all_counts_until_full() {
        let buf = Local::<i32>::new(3);
        assert_eq!(buf.produce_all(0..10), 3);
        assert_eq!(buf.produce_all(0..10), 0);
        assert_eq!(buf.count(), 3);
    }

    #[test]
    fn test_produce_all_empty_source() {
        let buf = Local::<i32>::new(3);
        assert_eq!(buf.produce_all(Vec::<i32>::new()), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_consume_all_with_reproduction() {
        let buf = Local::<&str>::new(4);
        buf.produce_all(["a", "b"]);

        let mut seen = Vec::new();
        let mut budget = 3;
        let drained = buf
            .consume_all(|item| {
                seen.push(item);
                if budget > 0 {
                    budget -= 1;
                    buf.produce(item).unwrap();
                }
            })
            .unwrap();

        assert_eq!(drained, 5);
        assert_eq!(seen, vec!["a", "b", "a", "b", "a"]);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_dyn_contract() {
        let buf: Box<dyn CircularBuffer<u8>> = Box::new(Local::<u8>::new(1));
        buf.produce(9).unwrap();
        assert!(buf.is_full());
        assert!(buf.produce(10).is_err());
        assert_eq!(buf.consume(), Ok(9));
        buf.clear();
        assert_eq!(buf.consume(), Err(Underflow));
    }
}
