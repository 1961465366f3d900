//! Fixed-size fail-fast buffer implementation.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tracing::trace;

use crate::contract::CircularBuffer;
use crate::error::{Overflow, Underflow};
use crate::lock::SharedLock;

/// A thread-safe fixed-size FIFO buffer that fails fast.
///
/// `BoundedBuffer<T>` holds at most `capacity` elements. Producing into a
/// full buffer fails with [`Overflow`] and consuming from an empty one fails
/// with [`Underflow`]; neither operation ever waits.
///
/// # Semantics
///
/// - **Produce**: appends at the tail, fails immediately when full
/// - **Consume**: removes the head and shifts the rest forward, fails
///   immediately when empty
/// - **Clear**: resets the count without touching stored elements
///
/// # Locking
///
/// Buffers created with [`BoundedBuffer::new`] share one lock per element
/// type: every `BoundedBuffer<T>` for the same `T` serializes its produce
/// and consume calls through it, even when the buffers are unrelated. Use
/// [`BoundedBuffer::with_lock`] to choose the lock explicitly.
///
/// `count`, `is_empty`, `is_full` and `clear` do not take the lock. See
/// [`CircularBuffer`] for what that means for callers.
///
/// # Example
///
/// ```
/// use circbuf::{BoundedBuffer, CircularBuffer, Underflow};
///
/// let buf = BoundedBuffer::<&str>::new(2);
/// buf.produce("one").unwrap();
/// buf.produce("two").unwrap();
/// assert!(buf.produce("four").is_err());
///
/// assert_eq!(buf.consume(), Ok("one"));
/// assert_eq!(buf.consume(), Ok("two"));
/// assert_eq!(buf.consume(), Err(Underflow));
/// ```
pub struct BoundedBuffer<T> {
    inner: Arc<BoundedBufferInner<T>>,
}

struct BoundedBufferInner<T> {
    lock: SharedLock,
    // Only locked while `lock` is held, so it is never contended.
    slots: Mutex<Box<[Option<T>]>>,
    // Live elements occupy slots[..count].
    count: AtomicUsize,
    capacity: usize,
}

impl<T> Clone for BoundedBuffer<T> {
    fn clone(&self) -> Self {
        BoundedBuffer {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: 'static> BoundedBuffer<T> {
    /// Creates a new BoundedBuffer with the specified capacity.
    ///
    /// The buffer uses the process-wide lock for `T`. A capacity of 0 is
    /// allowed; such a buffer is always full.
    pub fn new(capacity: usize) -> Self {
        Self::with_lock(capacity, SharedLock::for_type::<T>())
    }
}

impl<T> BoundedBuffer<T> {
    /// Creates a new BoundedBuffer that serializes produce and consume
    /// through `lock`.
    ///
    /// Passing a fresh [`SharedLock::new`] gives the buffer a lock of its
    /// own; passing clones of one handle makes several buffers share it.
    pub fn with_lock(capacity: usize, lock: SharedLock) -> Self {
        let slots = std::iter::repeat_with(|| None).take(capacity).collect();
        BoundedBuffer {
            inner: Arc::new(BoundedBufferInner {
                lock,
                slots: Mutex::new(slots),
                count: AtomicUsize::new(0),
                capacity,
            }),
        }
    }

    /// Returns the lock this buffer serializes produce and consume through.
    pub fn lock(&self) -> &SharedLock {
        &self.inner.lock
    }
}

impl<T: Clone> BoundedBuffer<T> {
    /// Returns a copy of all live elements, oldest first.
    ///
    /// The snapshot is taken under the buffer's lock.
    pub fn to_vec(&self) -> Vec<T> {
        let _guard = self.inner.lock.lock();
        let count = self.inner.count.load(Ordering::Acquire);
        let slots = self.inner.slots.lock();
        slots[..count].iter().flatten().cloned().collect()
    }
}

impl<T> CircularBuffer<T> for BoundedBuffer<T> {
    fn capacity(&self) -> usize {
        self.inner.capacity
    }

    fn count(&self) -> usize {
        self.inner.count.load(Ordering::Acquire)
    }

    fn clear(&self) {
        self.inner.count.store(0, Ordering::Release);
    }

    fn produce(&self, item: T) -> Result<(), Overflow<T>> {
        let guard = self.inner.lock.lock();
        let count = self.inner.count.load(Ordering::Acquire);
        if count >= self.inner.capacity {
            trace!(count, "circbuf: produce on full buffer");
            return Err(Overflow::new(item));
        }

        let stale = {
            let mut slots = self.inner.slots.lock();
            let stale = std::mem::replace(&mut slots[count], Some(item));
            self.inner.count.store(count + 1, Ordering::Release);
            stale
        };
        // A slot past the live prefix may still hold an element left by
        // `clear`; drop it only after the lock is released.
        drop(guard);
        drop(stale);
        Ok(())
    }

    fn consume(&self) -> Result<T, Underflow> {
        let _guard = self.inner.lock.lock();
        let count = self.inner.count.load(Ordering::Acquire);
        if count == 0 {
            trace!("circbuf: consume on empty buffer");
            return Err(Underflow);
        }

        let mut slots = self.inner.slots.lock();
        let Some(item) = slots[0].take() else {
            return Err(Underflow);
        };
        // Shift the remaining elements forward; the emptied slot moves to
        // the end of the live prefix.
        slots[..count].rotate_left(1);
        self.inner.count.store(count - 1, Ordering::Release);
        Ok(item)
    }
}

impl<T> fmt::Debug for BoundedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedBuffer")
            .field("capacity", &self.inner.capacity)
            .field("count", &self.count())
            .finish()
    }
}
