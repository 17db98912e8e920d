//! Safe Rust driver for libiio (Linux Industrial I/O) devices.
//!
//! This crate provides a safe interface to IIO hardware (ADCs, DACs,
//! temperature sensors, IMUs, SDR front-ends) through libiio. It wraps the
//! low-level FFI bindings from `iio-sys` with uniform error handling and
//! RAII resource management.
//!
//! # Architecture
//!
//! ## Ownership
//! - [`OwnedHandle`] - Single-owner wrapper releasing a libiio handle exactly once
//! - [`check`] / [`check_status`] - Gate every libiio result passes through
//!
//! ## Owned Resources
//! - [`Context`] - Connection to a set of devices
//! - [`Scan`] - Result of a discovery pass
//! - [`ChannelsMask`] - Channel selection bitset
//!
//! ## Borrowed Views
//! - [`Device`] / [`Channel`] / [`Attribute`] - Valid only while their
//!   [`Context`] is alive; the borrow checker enforces this
//!
//! ## Values
//! - [`value`] - Calibrated channel reading from `input` or `raw`/`scale`/`offset`
//! - [`ChannelSnapshot`] - Offline attribute copy usable with [`value`]
//!
//! # Examples
//!
//! ## Reading Every Input Channel
//!
//! ```no_run
//! use daq_driver_iio::{Context, ContextParams};
//!
//! # fn example() -> daq_driver_iio::Result<()> {
//! let ctx = Context::new(&ContextParams::default(), Some("local:"))?;
//!
//! for dev in ctx.devices() {
//!     for chn in dev.channels().filter(|c| !c.is_output()) {
//!         match chn.value() {
//!             Ok(v) => println!("{}/{}: {:.3}", dev.display_name(), chn.id(), v),
//!             Err(e) if e.is_not_found() => continue,
//!             Err(e) => return Err(e),
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Discovering Contexts
//!
//! ```no_run
//! use daq_driver_iio::{scan, ContextParams};
//!
//! # fn example() -> daq_driver_iio::Result<()> {
//! let results = scan(&ContextParams::default(), Some("usb,ip"))?;
//! for result in results.results() {
//!     println!("{} [{}]", result.uri, result.description);
//! }
//! # Ok(())
//! # }
//! ```

pub mod attr;
pub mod channel;
pub mod check;
pub mod config;
pub mod context;
pub mod device;
pub mod error;
pub mod handle;
pub mod mask;
pub mod scan;
pub mod snapshot;
pub mod value;

pub use attr::{AttrOwner, Attribute, AttributeSource, ReadAttribute};
pub use channel::{Channel, Direction};
pub use check::{check, check_status};
pub use config::IioConfig;
pub use context::{create_context, Context, ContextParams, ContextVersion, LogLevel};
pub use device::Device;
pub use error::{IioError, Result};
pub use handle::{OwnedHandle, ReleaseFn};
pub use mask::{create_channels_mask, ChannelsMask};
pub use scan::{scan, Scan, ScanResult};
pub use snapshot::{ChannelSnapshot, SnapshotAttr};
pub use value::value;
