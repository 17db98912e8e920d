//! Discovery of available libiio contexts.

use tracing::debug;

use iio_sys::iio_scan;

use crate::check::{check, from_c_str, to_cstring};
use crate::context::ContextParams;
use crate::error::Result;
use crate::handle::OwnedHandle;

/// One context found by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Human-readable description
    pub description: String,
    /// URI to pass to [`Context::new`](crate::Context::new)
    pub uri: String,
}

/// The result of a discovery pass over one or more backends.
pub struct Scan {
    handle: OwnedHandle<iio_scan>,
}

impl Scan {
    /// Scan for contexts.
    ///
    /// # Arguments
    ///
    /// * `params` - Logging and timeout parameters
    /// * `backends` - Comma-separated backend filter (e.g. "usb,ip");
    ///   `None` scans every backend libiio was built with
    ///
    /// # Errors
    ///
    /// Returns [`IioError::Call`](crate::IioError::Call) labelled
    /// `iio_scan` if the scan fails.
    pub fn new(params: &ContextParams, backends: Option<&str>) -> Result<Self> {
        let c_backends = backends
            .map(|b| to_cstring(b, "backend filter"))
            .transpose()?;
        let raw_params = params.to_raw();

        // SAFETY: raw_params and c_backends outlive the call
        let raw = unsafe {
            iio_sys::iio_scan(
                &raw_params,
                c_backends.as_ref().map_or(std::ptr::null(), |b| b.as_ptr()),
            )
        };
        let raw = check(raw, "iio_scan")?;

        // SAFETY: raw passed the gate and is owned by nobody else
        let handle = unsafe { OwnedHandle::from_raw(raw.as_ptr(), iio_sys::iio_scan_destroy, "scan") };

        let scan = Self { handle };
        debug!(
            backends = backends.unwrap_or("<all>"),
            results = scan.results_count(),
            "Scanned for libiio contexts"
        );
        Ok(scan)
    }

    /// Number of contexts found.
    pub fn results_count(&self) -> usize {
        // SAFETY: handle is valid
        unsafe { iio_sys::iio_scan_get_results_count(self.handle.as_ptr()) }
    }

    /// Scan result at `index`.
    pub fn get(&self, index: usize) -> Option<ScanResult> {
        if index >= self.results_count() {
            return None;
        }
        // SAFETY: handle is valid and index is in range
        unsafe {
            let description = from_c_str(iio_sys::iio_scan_get_description(
                self.handle.as_ptr(),
                index,
            ))?;
            let uri = from_c_str(iio_sys::iio_scan_get_uri(self.handle.as_ptr(), index))?;
            Some(ScanResult { description, uri })
        }
    }

    /// All scan results.
    pub fn results(&self) -> impl Iterator<Item = ScanResult> + '_ {
        (0..self.results_count()).filter_map(move |i| self.get(i))
    }
}

impl std::fmt::Debug for Scan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scan")
            .field("results", &self.results_count())
            .finish()
    }
}

/// Scan for contexts; see [`Scan::new`].
pub fn scan(params: &ContextParams, backends: Option<&str>) -> Result<Scan> {
    Scan::new(params, backends)
}
