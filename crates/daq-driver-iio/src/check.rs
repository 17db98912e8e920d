//! Error-checking gate for libiio calls.
//!
//! Every handle- or status-returning call into libiio goes through one of
//! these functions, labelled with the C function's name. A failed result
//! becomes an [`IioError::Call`]; a successful one is returned unchanged.
//! Nothing here retries or logs.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr::NonNull;

use crate::error::{IioError, Result};

/// Validate a handle returned by libiio.
///
/// libiio 1.x encodes a negative errno in the returned pointer; older entry
/// points return null and set `errno`. Both are reported as a failure of
/// `operation`.
pub fn check<T>(ptr: *mut T, operation: &'static str) -> Result<NonNull<T>> {
    match NonNull::new(ptr) {
        // errno is read before anything else can clobber it
        None => Err(IioError::from_errno(operation)),
        Some(handle) => match iio_sys::iio_err(ptr) {
            0 => Ok(handle),
            err => Err(IioError::Call {
                operation,
                errno: -err,
            }),
        },
    }
}

/// Validate a status code returned by libiio.
///
/// Negative values are negated errno codes; anything else is success and
/// is returned as-is (byte counts, for instance).
pub fn check_status<S>(status: S, operation: &'static str) -> Result<S>
where
    S: Copy + Into<i64>,
{
    let code: i64 = status.into();
    if code < 0 {
        Err(IioError::Call {
            operation,
            errno: i32::try_from(-code).unwrap_or(libc::EIO),
        })
    } else {
        Ok(status)
    }
}

/// Convert a Rust string for passing to libiio.
pub(crate) fn to_cstring(value: &str, what: &str) -> Result<CString> {
    CString::new(value).map_err(|_| IioError::InvalidArgument {
        message: format!("{} contains a NUL byte: {:?}", what, value),
    })
}

/// Copy a C string owned by libiio; null maps to `None`.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
pub(crate) unsafe fn from_c_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}
