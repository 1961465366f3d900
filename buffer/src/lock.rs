//! Shared lock handles and the per-type lock registry.

use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::{Mutex, MutexGuard};
use tracing::debug;

static REGISTRY: Lazy<Mutex<HashMap<TypeId, SharedLock>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// A cloneable handle to a lock that serializes produce and consume.
///
/// Every buffer holding a handle to the same lock serializes its produce
/// and consume calls against every other such buffer. [`SharedLock::for_type`]
/// hands out one lock per element type for the whole process;
/// [`SharedLock::new`] creates a fresh lock that can be injected into one or
/// more buffers with `BoundedBuffer::with_lock`.
#[derive(Clone, Default)]
pub struct SharedLock {
    inner: Arc<Mutex<()>>,
}

impl SharedLock {
    /// Creates a new lock not shared with anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide lock for element type `T`.
    ///
    /// The lock is created on first use and the same lock is returned for
    /// every later call with the same `T`.
    pub fn for_type<T: 'static>() -> Self {
        let mut reg = REGISTRY.lock();
        reg.entry(TypeId::of::<T>())
            .or_insert_with(|| {
                debug!(element = type_name::<T>(), "circbuf: created shared lock");
                SharedLock::new()
            })
            .clone()
    }

    /// Returns true if both handles refer to the same lock.
    pub fn ptr_eq(a: &SharedLock, b: &SharedLock) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, ()> {
        self.inner.lock()
    }
}

impl fmt::Debug for SharedLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedLock")
            .field("ptr", &Arc::as_ptr(&self.inner))
            .finish()
    }
}
