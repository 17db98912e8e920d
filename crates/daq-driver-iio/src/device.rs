//! Device view within a [`Context`].

use iio_sys::iio_device;

use crate::attr::{AttrOwner, Attribute};
use crate::channel::Channel;
use crate::check::from_c_str;
use crate::context::Context;

/// An IIO device (e.g. an ADC such as `ad9361-phy` or `xadc`).
///
/// A device is not owned: it is a reference to its [`Context`] plus the
/// device's index, resolved again on every access.
#[derive(Clone, Copy)]
pub struct Device<'ctx> {
    ctx: &'ctx Context,
    index: u32,
}

impl<'ctx> Device<'ctx> {
    pub(crate) fn new(ctx: &'ctx Context, index: u32) -> Option<Self> {
        if index >= ctx.devices_count() {
            return None;
        }
        Some(Self { ctx, index })
    }

    pub(crate) fn as_ptr(&self) -> *const iio_device {
        // SAFETY: index was range-checked at construction and a context's
        // device list never changes.
        unsafe { iio_sys::iio_context_get_device(self.ctx.as_ptr(), self.index) }
    }

    /// The context this device belongs to.
    pub fn context(&self) -> &'ctx Context {
        self.ctx
    }

    /// Position of this device within its context.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Device ID (e.g. "iio:device0").
    pub fn id(&self) -> String {
        // SAFETY: device pointer is valid for 'ctx
        unsafe { from_c_str(iio_sys::iio_device_get_id(self.as_ptr())) }.unwrap_or_default()
    }

    /// Device name, if it has one.
    pub fn name(&self) -> Option<String> {
        // SAFETY: device pointer is valid for 'ctx
        unsafe { from_c_str(iio_sys::iio_device_get_name(self.as_ptr())) }
    }

    /// Device label, if it has one.
    pub fn label(&self) -> Option<String> {
        // SAFETY: device pointer is valid for 'ctx
        unsafe { from_c_str(iio_sys::iio_device_get_label(self.as_ptr())) }
    }

    /// Name if present, otherwise the ID.
    pub fn display_name(&self) -> String {
        self.name().unwrap_or_else(|| self.id())
    }

    /// Number of channels.
    pub fn channels_count(&self) -> u32 {
        // SAFETY: device pointer is valid for 'ctx
        unsafe { iio_sys::iio_device_get_channels_count(self.as_ptr()) }
    }

    /// Channel at `index`, if it exists.
    pub fn channel(&self, index: u32) -> Option<Channel<'ctx>> {
        Channel::new(*self, index)
    }

    /// All channels of this device.
    pub fn channels(&self) -> impl Iterator<Item = Channel<'ctx>> + 'ctx {
        let dev = *self;
        (0..dev.channels_count()).filter_map(move |i| dev.channel(i))
    }

    /// Find a channel by ID or name and direction.
    pub fn find_channel(&self, name: &str, output: bool) -> Option<Channel<'ctx>> {
        let c_name = std::ffi::CString::new(name).ok()?;
        // SAFETY: device pointer is valid and c_name is NUL-terminated
        let found =
            unsafe { iio_sys::iio_device_find_channel(self.as_ptr(), c_name.as_ptr(), output) };
        if found.is_null() {
            return None;
        }
        self.channels().find(|chn| chn.as_ptr() == found as *const _)
    }

    /// Number of device attributes.
    pub fn attrs_count(&self) -> u32 {
        // SAFETY: device pointer is valid for 'ctx
        unsafe { iio_sys::iio_device_get_attrs_count(self.as_ptr()) }
    }

    /// Device attribute at `index`.
    pub fn attr(&self, index: u32) -> Option<Attribute<'ctx>> {
        // SAFETY: device pointer is valid; libiio returns null when out of range
        unsafe {
            let raw = iio_sys::iio_device_get_attr(self.as_ptr(), index);
            Attribute::from_indexed(AttrOwner::Device(*self), raw)
        }
    }

    /// All device attributes.
    pub fn attrs(&self) -> impl Iterator<Item = Attribute<'ctx>> + 'ctx {
        let dev = *self;
        (0..dev.attrs_count()).filter_map(move |i| dev.attr(i))
    }

    /// Look up a device attribute by name.
    pub fn find_attr(&self, name: &str) -> Option<Attribute<'ctx>> {
        Attribute::find(AttrOwner::Device(*self), name)
    }
}

impl std::fmt::Debug for Device<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("index", &self.index)
            .field("id", &self.id())
            .field("name", &self.name())
            .finish()
    }
}
