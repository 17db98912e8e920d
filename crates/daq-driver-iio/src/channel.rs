//! Channel view within a [`Device`].

use iio_sys::iio_channel;

use crate::attr::{AttrOwner, Attribute, AttributeSource};
use crate::check::from_c_str;
use crate::device::Device;
use crate::error::{IioError, Result};
use crate::mask::ChannelsMask;
use crate::snapshot::ChannelSnapshot;

/// Direction of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Device to host (ADC, sensor)
    Input,
    /// Host to device (DAC)
    Output,
}

/// An IIO channel (e.g. `voltage0`, `temp`, `accel_x`).
///
/// Borrowed from its [`Context`](crate::Context): a device reference plus
/// the channel index, resolved on each access.
#[derive(Clone, Copy)]
pub struct Channel<'ctx> {
    device: Device<'ctx>,
    index: u32,
}

impl<'ctx> Channel<'ctx> {
    pub(crate) fn new(device: Device<'ctx>, index: u32) -> Option<Self> {
        if index >= device.channels_count() {
            return None;
        }
        Some(Self { device, index })
    }

    pub(crate) fn as_ptr(&self) -> *const iio_channel {
        // SAFETY: index was range-checked at construction and a device's
        // channel list never changes.
        unsafe { iio_sys::iio_device_get_channel(self.device.as_ptr(), self.index) }
    }

    /// The device this channel belongs to.
    pub fn device(&self) -> Device<'ctx> {
        self.device
    }

    /// Position of this channel within its device.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Channel ID (e.g. "voltage0").
    pub fn id(&self) -> String {
        // SAFETY: channel pointer is valid for 'ctx
        unsafe { from_c_str(iio_sys::iio_channel_get_id(self.as_ptr())) }.unwrap_or_default()
    }

    /// Channel name, if it has one.
    pub fn name(&self) -> Option<String> {
        // SAFETY: channel pointer is valid for 'ctx
        unsafe { from_c_str(iio_sys::iio_channel_get_name(self.as_ptr())) }
    }

    /// Channel label, if it has one.
    pub fn label(&self) -> Option<String> {
        // SAFETY: channel pointer is valid for 'ctx
        unsafe { from_c_str(iio_sys::iio_channel_get_label(self.as_ptr())) }
    }

    /// Channel direction.
    pub fn direction(&self) -> Direction {
        if self.is_output() {
            Direction::Output
        } else {
            Direction::Input
        }
    }

    /// Whether this is an output channel.
    pub fn is_output(&self) -> bool {
        // SAFETY: channel pointer is valid for 'ctx
        unsafe { iio_sys::iio_channel_is_output(self.as_ptr()) }
    }

    /// Whether this channel can be captured into a buffer.
    pub fn is_scan_element(&self) -> bool {
        // SAFETY: channel pointer is valid for 'ctx
        unsafe { iio_sys::iio_channel_is_scan_element(self.as_ptr()) }
    }

    /// Number of channel attributes.
    pub fn attrs_count(&self) -> u32 {
        // SAFETY: channel pointer is valid for 'ctx
        unsafe { iio_sys::iio_channel_get_attrs_count(self.as_ptr()) }
    }

    /// Channel attribute at `index`.
    pub fn attr(&self, index: u32) -> Option<Attribute<'ctx>> {
        // SAFETY: channel pointer is valid; libiio returns null when out of range
        unsafe {
            let raw = iio_sys::iio_channel_get_attr(self.as_ptr(), index);
            Attribute::from_indexed(AttrOwner::Channel(*self), raw)
        }
    }

    /// All channel attributes.
    pub fn attrs(&self) -> impl Iterator<Item = Attribute<'ctx>> + 'ctx {
        let chn = *self;
        (0..chn.attrs_count()).filter_map(move |i| chn.attr(i))
    }

    /// Look up a channel attribute by name. Absence is `None`.
    pub fn find_attr(&self, name: &str) -> Option<Attribute<'ctx>> {
        Attribute::find(AttrOwner::Channel(*self), name)
    }

    /// Select this channel in `mask`.
    pub fn enable(&self, mask: &mut ChannelsMask) -> Result<()> {
        let raw = valid_mask(mask)?;
        // SAFETY: channel pointer and mask are both live
        unsafe { iio_sys::iio_channel_enable(self.as_ptr(), raw) };
        Ok(())
    }

    /// Deselect this channel in `mask`.
    pub fn disable(&self, mask: &mut ChannelsMask) -> Result<()> {
        let raw = valid_mask(mask)?;
        // SAFETY: channel pointer and mask are both live
        unsafe { iio_sys::iio_channel_disable(self.as_ptr(), raw) };
        Ok(())
    }

    /// Whether this channel is selected in `mask`.
    pub fn is_enabled(&self, mask: &ChannelsMask) -> bool {
        if !mask.is_valid() {
            return false;
        }
        // SAFETY: channel pointer and mask are both live
        unsafe { iio_sys::iio_channel_is_enabled(self.as_ptr(), mask.as_ptr()) }
    }

    /// Physical value of this channel in base units.
    ///
    /// See [`value`](crate::value::value) for how attributes are combined.
    pub fn value(&self) -> Result<f64> {
        crate::value::value(self)
    }

    /// Read every attribute of this channel into an offline snapshot.
    pub fn snapshot(&self) -> Result<ChannelSnapshot> {
        ChannelSnapshot::capture(self)
    }
}

fn valid_mask(mask: &mut ChannelsMask) -> Result<*mut iio_sys::iio_channels_mask> {
    if !mask.is_valid() {
        return Err(IioError::InvalidArgument {
            message: "channel mask was not allocated".to_string(),
        });
    }
    Ok(mask.as_ptr())
}

impl<'ctx> AttributeSource for Channel<'ctx> {
    type Attr<'a> = Attribute<'ctx> where Self: 'a;

    fn find_attr(&self, name: &str) -> Option<Attribute<'ctx>> {
        Channel::find_attr(self, name)
    }
}

impl std::fmt::Debug for Channel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("device", &self.device.index())
            .field("index", &self.index)
            .field("id", &self.id())
            .field("direction", &self.direction())
            .finish()
    }
}
