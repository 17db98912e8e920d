//! libiio context: the top-level handle for a set of IIO devices.
//!
//! A [`Context`] is created from an optional URI (`local:`, `ip:192.168.2.1`,
//! `usb:1.2.3`, ...) and owns everything reachable from it. Devices,
//! channels and attributes are borrowed views and cannot outlive it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use iio_sys::{iio_context, iio_context_params};

use crate::attr::{AttrOwner, Attribute};
use crate::check::{check, check_status, from_c_str, to_cstring};
use crate::device::Device;
use crate::error::Result;
use crate::handle::OwnedHandle;

/// libiio log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging at all
    #[serde(alias = "none")]
    NoLog,
    /// Errors only
    Error,
    /// Errors and warnings
    #[serde(alias = "warn")]
    Warning,
    /// Informational messages
    #[default]
    Info,
    /// Everything
    Debug,
}

impl LogLevel {
    /// Convert to the raw libiio value.
    pub fn to_raw(self) -> iio_sys::iio_log_level {
        match self {
            Self::NoLog => iio_sys::LEVEL_NOLOG,
            Self::Error => iio_sys::LEVEL_ERROR,
            Self::Warning => iio_sys::LEVEL_WARNING,
            Self::Info => iio_sys::LEVEL_INFO,
            Self::Debug => iio_sys::LEVEL_DEBUG,
        }
    }
}

/// Parameters for [`Context::new`] and [`Scan::new`](crate::scan::Scan::new).
///
/// Unset levels and a zero timeout leave libiio's defaults in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextParams {
    /// Level of messages written to the library's output stream
    pub log_level: Option<LogLevel>,
    /// Level at and above which messages go to stderr
    pub stderr_level: Option<LogLevel>,
    /// Level at and above which messages are timestamped
    pub timestamp_level: Option<LogLevel>,
    /// I/O timeout in milliseconds (0 = backend default)
    pub timeout_ms: u32,
}

impl ContextParams {
    /// Parameters that leave every setting at libiio's default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the stderr level.
    pub fn with_stderr_level(mut self, level: LogLevel) -> Self {
        self.stderr_level = Some(level);
        self
    }

    /// Set the timestamp level.
    pub fn with_timestamp_level(mut self, level: LogLevel) -> Self {
        self.timestamp_level = Some(level);
        self
    }

    /// Set the I/O timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Build the C parameter block.
    pub fn to_raw(&self) -> iio_context_params {
        let level = |l: Option<LogLevel>| l.map_or(0, LogLevel::to_raw);

        iio_context_params {
            log_level: level(self.log_level),
            stderr_level: level(self.stderr_level),
            timestamp_level: level(self.timestamp_level),
            timeout_ms: self.timeout_ms,
            ..Default::default()
        }
    }
}

/// Library version reported by a context's backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextVersion {
    /// Major version
    pub major: u32,
    /// Minor version
    pub minor: u32,
    /// Git tag of the build
    pub tag: String,
}

/// An open libiio context.
///
/// The context is destroyed when this value is dropped. Every [`Device`],
/// [`Channel`](crate::channel::Channel) and [`Attribute`] borrows from it,
/// so the borrow checker rejects any use after destruction.
pub struct Context {
    handle: OwnedHandle<iio_context>,
    uri: Option<String>,
}

impl Context {
    /// Create a context.
    ///
    /// # Arguments
    ///
    /// * `params` - Logging and timeout parameters
    /// * `uri` - Target URI; `None` lets libiio pick (honouring `IIOD_REMOTE`)
    ///
    /// # Errors
    ///
    /// Returns [`IioError::Call`](crate::IioError::Call) labelled
    /// `iio_create_context` if libiio cannot create the context.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use daq_driver_iio::{Context, ContextParams};
    ///
    /// let ctx = Context::new(&ContextParams::default(), Some("local:"))?;
    /// println!("{} devices", ctx.devices_count());
    /// # Ok::<(), daq_driver_iio::IioError>(())
    /// ```
    pub fn new(params: &ContextParams, uri: Option<&str>) -> Result<Self> {
        let c_uri = uri.map(|u| to_cstring(u, "context URI")).transpose()?;
        let raw_params = params.to_raw();

        // SAFETY: raw_params and c_uri outlive the call
        let raw = unsafe {
            iio_sys::iio_create_context(
                &raw_params,
                c_uri.as_ref().map_or(std::ptr::null(), |u| u.as_ptr()),
            )
        };
        let raw = check(raw, "iio_create_context")?;

        // SAFETY: raw passed the gate and is owned by nobody else
        let handle = unsafe {
            OwnedHandle::from_raw(raw.as_ptr(), iio_sys::iio_context_destroy, "context")
        };

        info!(uri = uri.unwrap_or("<default>"), "Opened libiio context");

        Ok(Self {
            handle,
            uri: uri.map(str::to_string),
        })
    }

    pub(crate) fn as_ptr(&self) -> *mut iio_context {
        self.handle.as_ptr()
    }

    /// URI this context was created with, if one was given.
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Backend name (e.g. "local", "network").
    pub fn name(&self) -> String {
        // SAFETY: handle is valid
        unsafe { from_c_str(iio_sys::iio_context_get_name(self.as_ptr())) }.unwrap_or_default()
    }

    /// Human-readable description of the context.
    pub fn description(&self) -> String {
        // SAFETY: handle is valid
        unsafe { from_c_str(iio_sys::iio_context_get_description(self.as_ptr())) }
            .unwrap_or_default()
    }

    /// Backend library version.
    pub fn version(&self) -> ContextVersion {
        // SAFETY: handle is valid
        unsafe {
            ContextVersion {
                major: iio_sys::iio_context_get_version_major(self.as_ptr()),
                minor: iio_sys::iio_context_get_version_minor(self.as_ptr()),
                tag: from_c_str(iio_sys::iio_context_get_version_tag(self.as_ptr()))
                    .unwrap_or_default(),
            }
        }
    }

    /// Change the I/O timeout for this context.
    pub fn set_timeout(&self, timeout_ms: u32) -> Result<()> {
        // SAFETY: handle is valid
        let ret = unsafe { iio_sys::iio_context_set_timeout(self.as_ptr(), timeout_ms) };
        check_status(ret, "iio_context_set_timeout")?;
        debug!(timeout_ms, "Set libiio context timeout");
        Ok(())
    }

    /// Number of devices in this context.
    pub fn devices_count(&self) -> u32 {
        // SAFETY: handle is valid
        unsafe { iio_sys::iio_context_get_devices_count(self.as_ptr()) }
    }

    /// Device at `index`, if it exists.
    pub fn device(&self, index: u32) -> Option<Device<'_>> {
        Device::new(self, index)
    }

    /// All devices in this context.
    pub fn devices(&self) -> impl Iterator<Item = Device<'_>> + '_ {
        (0..self.devices_count()).filter_map(move |i| self.device(i))
    }

    /// Find a device by ID, name or label.
    pub fn find_device(&self, name: &str) -> Option<Device<'_>> {
        let c_name = std::ffi::CString::new(name).ok()?;
        // SAFETY: handle is valid and c_name is NUL-terminated
        let found = unsafe { iio_sys::iio_context_find_device(self.as_ptr(), c_name.as_ptr()) };
        if found.is_null() {
            return None;
        }
        self.devices().find(|dev| dev.as_ptr() == found as *const _)
    }

    /// Number of context attributes.
    pub fn attrs_count(&self) -> u32 {
        // SAFETY: handle is valid
        unsafe { iio_sys::iio_context_get_attrs_count(self.as_ptr()) }
    }

    /// Context attribute at `index`.
    pub fn attr(&self, index: u32) -> Option<Attribute<'_>> {
        // SAFETY: handle is valid; libiio returns null when out of range
        unsafe {
            let raw = iio_sys::iio_context_get_attr(self.as_ptr(), index);
            Attribute::from_indexed(AttrOwner::Context(self), raw)
        }
    }

    /// All context attributes.
    pub fn attrs(&self) -> impl Iterator<Item = Attribute<'_>> + '_ {
        (0..self.attrs_count()).filter_map(move |i| self.attr(i))
    }

    /// Look up a context attribute by name.
    pub fn find_attr(&self, name: &str) -> Option<Attribute<'_>> {
        Attribute::find(AttrOwner::Context(self), name)
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("uri", &self.uri)
            .field("handle", &self.handle)
            .finish()
    }
}

/// Create a context; see [`Context::new`].
pub fn create_context(params: &ContextParams, uri: Option<&str>) -> Result<Context> {
    Context::new(params, uri)
}
