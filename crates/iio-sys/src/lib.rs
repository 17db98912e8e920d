//! Low-level FFI bindings for the libiio C library.
//!
//! This crate provides raw, unsafe bindings to libiio, the user-space
//! interface to Linux Industrial I/O (IIO) devices: ADCs, DACs, IMUs and
//! other converters exposed locally through sysfs or remotely through iiod.
//!
//! # libiio Overview
//!
//! libiio models hardware as a tree of handles: a context owns devices,
//! devices own channels, and contexts, devices and channels all carry
//! named attributes. Only contexts, scan results and channel masks are
//! created (and destroyed) by the caller; everything else lives as long as
//! its context.
//!
//! # Safety
//!
//! All functions in this crate are `unsafe` as they are direct FFI bindings.
//! For a safe wrapper, use the `daq-driver-iio` crate instead.
//!
//! # Features
//!
//! - `iio-sdk`: Generate bindings from system libiio headers.
//!   Without this feature, stand-in bindings are used for cross-compilation.
//!
//! # Example (unsafe)
//!
//! ```no_run
//! use iio_sys::*;
//! use std::ffi::CString;
//!
//! unsafe {
//!     let params = iio_context_params::default();
//!     let uri = CString::new("local:").unwrap();
//!     let ctx = iio_create_context(&params, uri.as_ptr());
//!     if iio_err(ctx) == 0 {
//!         let n_devices = iio_context_get_devices_count(ctx);
//!         println!("Context has {} devices", n_devices);
//!         iio_context_destroy(ctx);
//!     }
//! }
//! ```

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(dead_code)]
#![allow(clippy::all)]

// Include the generated bindings
include!(concat!(env!("OUT_DIR"), "/bindings.rs"));

/// Largest errno value that can be encoded in a returned pointer.
pub const MAX_ERRNO: isize = 4095;

// libiio 1.x reports creation failures by encoding a negative errno in the
// returned pointer. The header exposes this as static inline helpers, which
// bindgen cannot translate, so they are reimplemented here.

/// Extract the error code from a pointer returned by libiio.
///
/// Returns the negative errno encoded in `ptr`, or 0 if `ptr` is a regular
/// (possibly null) pointer.
#[inline]
pub fn iio_err<T>(ptr: *const T) -> std::os::raw::c_int {
    let addr = ptr as isize;
    if (-MAX_ERRNO..0).contains(&addr) {
        addr as std::os::raw::c_int
    } else {
        0
    }
}

/// Encode a negative errno as a pointer, the inverse of [`iio_err`].
#[inline]
pub fn iio_ptr<T>(err: std::os::raw::c_int) -> *mut T {
    err as isize as *mut T
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_constants() {
        assert_eq!(LEVEL_NOLOG, 1);
        assert_eq!(LEVEL_ERROR, 2);
        assert_eq!(LEVEL_WARNING, 3);
        assert_eq!(LEVEL_INFO, 4);
        assert_eq!(LEVEL_DEBUG, 5);
    }

    #[test]
    fn test_err_pointer_encoding() {
        let ptr: *mut iio_context = iio_ptr(-22);
        assert_eq!(iio_err(ptr), -22);
        assert_eq!(iio_err(std::ptr::null::<iio_context>()), 0);

        let value = 7u32;
        assert_eq!(iio_err(&value as *const u32), 0);
    }

    #[test]
    fn test_err_pointer_bounds() {
        assert_eq!(iio_err(iio_ptr::<iio_scan>(-4095)), -4095);
        assert_eq!(iio_err((-4096isize) as *const iio_scan), 0);
    }

    #[cfg(not(feature = "iio-sdk"))]
    #[test]
    fn test_channels_mask_without_sdk() {
        unsafe {
            let mask = iio_create_channels_mask(0);
            assert!(!mask.is_null());
            iio_channels_mask_destroy(mask);

            let mask = iio_create_channels_mask(64);
            assert!(!mask.is_null());
            iio_channels_mask_destroy(mask);
        }
    }

    #[cfg(not(feature = "iio-sdk"))]
    #[test]
    fn test_context_creation_reports_enosys() {
        unsafe {
            let params = iio_context_params::default();
            let ctx = iio_create_context(&params, std::ptr::null());
            assert_eq!(iio_err(ctx), -38);
        }
    }
}
