//! Single-owner wrapper for libiio handles.
//!
//! [`OwnedHandle`] binds a raw pointer obtained from libiio to the function
//! that releases it. The handle is released exactly once: when the owner is
//! dropped or explicitly [`reset`](OwnedHandle::reset). An empty owner never
//! calls its release function.
//!
//! The wrapper does not validate the handle, only its lifetime. Factories
//! pass raw results through [`check`](crate::check::check) first so that
//! no owner ever holds an error-encoded pointer.

use std::fmt;
use std::ptr::NonNull;

use tracing::debug;

/// Release function for a handle of type `T` (`iio_context_destroy`, ...).
pub type ReleaseFn<T> = unsafe extern "C" fn(*mut T);

/// Exclusive owner of a foreign handle.
///
/// Not `Clone`: ownership can only be moved. [`take`](Self::take) moves the
/// handle out explicitly and leaves this owner empty.
pub struct OwnedHandle<T> {
    ptr: Option<NonNull<T>>,
    release: ReleaseFn<T>,
    kind: &'static str,
}

impl<T> OwnedHandle<T> {
    /// Take ownership of a raw handle.
    ///
    /// A null `ptr` produces an empty owner.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a live handle that no other owner holds, and
    /// `release` must be the function that frees it. `release` will be
    /// called with `ptr` exactly once.
    pub unsafe fn from_raw(ptr: *mut T, release: ReleaseFn<T>, kind: &'static str) -> Self {
        Self {
            ptr: NonNull::new(ptr),
            release,
            kind,
        }
    }

    /// An owner that holds nothing.
    pub fn empty(release: ReleaseFn<T>, kind: &'static str) -> Self {
        Self {
            ptr: None,
            release,
            kind,
        }
    }

    /// Raw pointer for passing back into libiio; null if empty.
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.map_or(std::ptr::null_mut(), NonNull::as_ptr)
    }

    /// The held handle, if any.
    pub fn get(&self) -> Option<NonNull<T>> {
        self.ptr
    }

    /// Whether this owner holds no handle.
    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    /// Handle kind used in log events (e.g. "context").
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Release the handle now, leaving this owner empty.
    ///
    /// Calling this on an empty owner does nothing.
    pub fn reset(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            debug!(kind = self.kind, "Releasing libiio handle");
            // SAFETY: ptr came from from_raw, whose contract guarantees that
            // release frees it; take() ensures this runs at most once.
            unsafe { (self.release)(ptr.as_ptr()) };
        }
    }

    /// Move the handle into a new owner, leaving this one empty.
    pub fn take(&mut self) -> Self {
        Self {
            ptr: self.ptr.take(),
            release: self.release,
            kind: self.kind,
        }
    }

    /// Give up ownership without releasing. The caller becomes responsible
    /// for freeing the returned handle.
    pub fn into_raw(mut self) -> Option<NonNull<T>> {
        self.ptr.take()
    }
}

impl<T> Drop for OwnedHandle<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T> fmt::Debug for OwnedHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedHandle")
            .field("kind", &self.kind)
            .field("ptr", &self.as_ptr())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Stand-in for a foreign object that counts its own releases.
    struct Probe {
        released: Cell<u32>,
    }

    impl Probe {
        fn new() -> Box<Self> {
            Box::new(Self {
                released: Cell::new(0),
            })
        }
    }

    unsafe extern "C" fn release_probe(probe: *mut Probe) {
        let probe = &*probe;
        probe.released.set(probe.released.get() + 1);
    }

    fn own(probe: &mut Probe) -> OwnedHandle<Probe> {
        unsafe { OwnedHandle::from_raw(probe as *mut Probe, release_probe, "probe") }
    }

    #[test]
    fn test_release_once_on_drop() {
        let mut probe = Probe::new();
        {
            let handle = own(&mut probe);
            assert!(!handle.is_empty());
            assert_eq!(probe.released.get(), 0);
            drop(handle);
        }
        assert_eq!(probe.released.get(), 1);
    }

    #[test]
    fn test_release_on_early_return() {
        fn fails(handle: OwnedHandle<Probe>) -> Result<(), &'static str> {
            let _handle = handle;
            Err("bail out")
        }

        let mut probe = Probe::new();
        assert!(fails(own(&mut probe)).is_err());
        assert_eq!(probe.released.get(), 1);
    }

    #[test]
    fn test_reset_releases_and_empties() {
        let mut probe = Probe::new();
        let mut handle = own(&mut probe);

        handle.reset();
        assert!(handle.is_empty());
        assert!(handle.as_ptr().is_null());
        assert_eq!(probe.released.get(), 1);

        handle.reset();
        drop(handle);
        assert_eq!(probe.released.get(), 1);
    }

    #[test]
    fn test_take_transfers_ownership() {
        let mut probe = Probe::new();
        let mut source = own(&mut probe);
        let expected = source.as_ptr();

        let target = source.take();
        assert!(source.is_empty());
        assert_eq!(target.as_ptr(), expected);

        drop(source);
        assert_eq!(probe.released.get(), 0);

        drop(target);
        assert_eq!(probe.released.get(), 1);
    }

    #[test]
    fn test_move_releases_once() {
        let mut probe = Probe::new();
        let handle = own(&mut probe);
        let moved = vec![handle];
        assert_eq!(probe.released.get(), 0);
        drop(moved);
        assert_eq!(probe.released.get(), 1);
    }

    #[test]
    fn test_null_is_empty_and_never_released() {
        let handle: OwnedHandle<Probe> =
            unsafe { OwnedHandle::from_raw(std::ptr::null_mut(), release_probe, "probe") };
        assert!(handle.is_empty());
        assert!(handle.get().is_none());
        drop(handle);

        let empty = OwnedHandle::<Probe>::empty(release_probe, "probe");
        assert!(empty.is_empty());
    }

    #[test]
    fn test_into_raw_skips_release() {
        let mut probe = Probe::new();
        let handle = own(&mut probe);
        let raw = handle.into_raw();
        assert!(raw.is_some());
        assert_eq!(probe.released.get(), 0);
    }
}
