//! Build script for iio-sys FFI bindings.
//!
//! This script generates Rust FFI bindings from the libiio C headers
//! using bindgen. It supports two modes:
//!
//! 1. With `iio-sdk` feature: Generates bindings from system headers
//! 2. Without feature: Uses stand-in bindings for cross-compilation

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=wrapper.h");
    println!("cargo:rerun-if-env-changed=IIO_INCLUDE_DIR");

    #[cfg(feature = "iio-sdk")]
    generate_bindings();

    #[cfg(not(feature = "iio-sdk"))]
    generate_dummy_bindings();

    #[cfg(feature = "iio-sdk")]
    {
        if pkg_config::probe_library("libiio").is_ok() {
            return;
        }

        println!("cargo:rustc-link-lib=iio");

        let lib_paths = ["/usr/local/lib", "/usr/lib", "/usr/lib/x86_64-linux-gnu"];

        for path in lib_paths {
            if std::path::Path::new(path).join("libiio.so").exists()
                || std::path::Path::new(path).join("libiio.a").exists()
            {
                println!("cargo:rustc-link-search=native={}", path);
                break;
            }
        }
    }
}

#[cfg(feature = "iio-sdk")]
fn generate_bindings() {
    let include_dir = env::var("IIO_INCLUDE_DIR").unwrap_or_else(|_| {
        if let Ok(lib) = pkg_config::probe_library("libiio") {
            lib.include_paths
                .first()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_else(|| "/usr/local/include".to_string())
        } else {
            for path in ["/usr/local/include", "/usr/include"] {
                if std::path::Path::new(path).join("iio/iio.h").exists() {
                    return path.to_string();
                }
            }
            "/usr/local/include".to_string()
        }
    });

    println!("cargo:rerun-if-changed={}/iio/iio.h", include_dir);

    let bindings = bindgen::Builder::default()
        .header("wrapper.h")
        .clang_arg(format!("-I{}", include_dir))
        .allowlist_function("iio_.*")
        .allowlist_type("iio_.*")
        .allowlist_var("LEVEL_.*")
        // Flat constant names (LEVEL_INFO, ...) to match the stand-in bindings
        .default_enum_style(bindgen::EnumVariation::Consts)
        .prepend_enum_name(false)
        .derive_debug(true)
        .derive_default(true)
        .derive_copy(true)
        .generate_comments(true)
        .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()))
        .generate()
        .expect("Unable to generate libiio bindings");

    let out_path = PathBuf::from(env::var("OUT_DIR").unwrap());
    bindings
        .write_to_file(out_path.join("bindings.rs"))
        .expect("Couldn't write bindings!");
}

/// Generate stand-in bindings when the SDK is not available.
/// This allows the crate to compile on systems without libiio installed.
#[cfg(not(feature = "iio-sdk"))]
fn generate_dummy_bindings() {
    let out_path = PathBuf::from(env::var("OUT_DIR").unwrap());
    let dummy = r#"
// Stand-in bindings - iio-sdk feature not enabled
//
// Context and scan creation report ENOSYS through libiio's error-pointer
// convention, so callers see an ordinary creation failure. Channel masks are
// plain in-memory bitsets in libiio as well and are fully implemented here.
// Every other entry point is only reachable through a live context and panics.

use std::os::raw::{c_char, c_int, c_long, c_uint, c_void};

pub type ssize_t = c_long;

/// Opaque libiio handles
#[repr(C)]
pub struct iio_context {
    _private: [u8; 0],
}
#[repr(C)]
pub struct iio_device {
    _private: [u8; 0],
}
#[repr(C)]
pub struct iio_channel {
    _private: [u8; 0],
}
#[repr(C)]
pub struct iio_attr {
    _private: [u8; 0],
}
#[repr(C)]
pub struct iio_scan {
    _private: [u8; 0],
}

/// Channel selection bitset
pub struct iio_channels_mask {
    words: Vec<u32>,
}

/// Log levels
pub type iio_log_level = c_uint;
pub const LEVEL_NOLOG: iio_log_level = 1;
pub const LEVEL_ERROR: iio_log_level = 2;
pub const LEVEL_WARNING: iio_log_level = 3;
pub const LEVEL_INFO: iio_log_level = 4;
pub const LEVEL_DEBUG: iio_log_level = 5;

/// Context creation parameters
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct iio_context_params {
    pub out: *mut c_void,
    pub err: *mut c_void,
    pub log_level: iio_log_level,
    pub stderr_level: iio_log_level,
    pub timestamp_level: iio_log_level,
    pub timeout_ms: c_uint,
    pub __rsrv: [c_char; 32],
}

impl Default for iio_context_params {
    fn default() -> Self {
        Self {
            out: std::ptr::null_mut(),
            err: std::ptr::null_mut(),
            log_level: 0,
            stderr_level: 0,
            timestamp_level: 0,
            timeout_ms: 0,
            __rsrv: [0; 32],
        }
    }
}

const ENOSYS: c_int = 38;

const IIO_SDK_PANIC_MSG: &str = "libiio function called but iio-sdk feature is not enabled. \
    Enable the iio-sdk feature (or hardware in daq-driver-iio) to use the real libiio library.";

#[no_mangle]
pub unsafe extern "C" fn iio_create_context(
    _params: *const iio_context_params,
    _uri: *const c_char,
) -> *mut iio_context {
    iio_ptr(-ENOSYS)
}

#[no_mangle]
pub unsafe extern "C" fn iio_scan(
    _params: *const iio_context_params,
    _backends: *const c_char,
) -> *mut iio_scan {
    iio_ptr(-ENOSYS)
}

#[no_mangle]
pub unsafe extern "C" fn iio_create_channels_mask(nb_channels: c_uint) -> *mut iio_channels_mask {
    let words = vec![0u32; (nb_channels as usize + 31) / 32];
    Box::into_raw(Box::new(iio_channels_mask { words }))
}

#[no_mangle]
pub unsafe extern "C" fn iio_channels_mask_destroy(mask: *mut iio_channels_mask) {
    if !mask.is_null() {
        drop(Box::from_raw(mask));
    }
}

#[no_mangle]
pub unsafe extern "C" fn iio_context_destroy(_ctx: *mut iio_context) {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_context_get_name(_ctx: *const iio_context) -> *const c_char {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_context_get_description(_ctx: *const iio_context) -> *const c_char {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_context_get_version_major(_ctx: *const iio_context) -> c_uint {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_context_get_version_minor(_ctx: *const iio_context) -> c_uint {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_context_get_version_tag(_ctx: *const iio_context) -> *const c_char {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_context_get_devices_count(_ctx: *const iio_context) -> c_uint {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_context_get_device(
    _ctx: *const iio_context,
    _index: c_uint,
) -> *mut iio_device {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_context_find_device(
    _ctx: *const iio_context,
    _name: *const c_char,
) -> *mut iio_device {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_context_get_attrs_count(_ctx: *const iio_context) -> c_uint {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_context_get_attr(
    _ctx: *const iio_context,
    _index: c_uint,
) -> *const iio_attr {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_context_find_attr(
    _ctx: *const iio_context,
    _name: *const c_char,
) -> *const iio_attr {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_context_set_timeout(_ctx: *mut iio_context, _timeout_ms: c_uint) -> c_int {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_scan_destroy(_scan: *mut iio_scan) {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_scan_get_results_count(_scan: *const iio_scan) -> usize {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_scan_get_description(_scan: *const iio_scan, _index: usize) -> *const c_char {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_scan_get_uri(_scan: *const iio_scan, _index: usize) -> *const c_char {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_device_get_id(_dev: *const iio_device) -> *const c_char {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_device_get_name(_dev: *const iio_device) -> *const c_char {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_device_get_label(_dev: *const iio_device) -> *const c_char {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_device_get_channels_count(_dev: *const iio_device) -> c_uint {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_device_get_channel(
    _dev: *const iio_device,
    _index: c_uint,
) -> *mut iio_channel {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_device_find_channel(
    _dev: *const iio_device,
    _name: *const c_char,
    _output: bool,
) -> *mut iio_channel {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_device_get_attrs_count(_dev: *const iio_device) -> c_uint {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_device_get_attr(_dev: *const iio_device, _index: c_uint) -> *const iio_attr {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_device_find_attr(
    _dev: *const iio_device,
    _name: *const c_char,
) -> *const iio_attr {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_channel_get_id(_chn: *const iio_channel) -> *const c_char {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_channel_get_name(_chn: *const iio_channel) -> *const c_char {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_channel_get_label(_chn: *const iio_channel) -> *const c_char {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_channel_is_output(_chn: *const iio_channel) -> bool {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_channel_is_scan_element(_chn: *const iio_channel) -> bool {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_channel_get_attrs_count(_chn: *const iio_channel) -> c_uint {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_channel_get_attr(_chn: *const iio_channel, _index: c_uint) -> *const iio_attr {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_channel_find_attr(
    _chn: *const iio_channel,
    _name: *const c_char,
) -> *const iio_attr {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_channel_enable(_chn: *const iio_channel, _mask: *mut iio_channels_mask) {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_channel_disable(_chn: *const iio_channel, _mask: *mut iio_channels_mask) {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_channel_is_enabled(
    _chn: *const iio_channel,
    _mask: *const iio_channels_mask,
) -> bool {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_attr_get_name(_attr: *const iio_attr) -> *const c_char {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_attr_get_filename(_attr: *const iio_attr) -> *const c_char {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_attr_read_raw(
    _attr: *const iio_attr,
    _dst: *mut c_char,
    _len: usize,
) -> ssize_t {
    panic!("{}", IIO_SDK_PANIC_MSG);
}

#[no_mangle]
pub unsafe extern "C" fn iio_attr_write_string(_attr: *const iio_attr, _src: *const c_char) -> ssize_t {
    panic!("{}", IIO_SDK_PANIC_MSG);
}
"#;

    std::fs::write(out_path.join("bindings.rs"), dummy).expect("Couldn't write dummy bindings!");
}
