//! Channel selection masks.

use tracing::debug;

use iio_sys::iio_channels_mask;

use crate::handle::OwnedHandle;

/// A bitset selecting channels of a device, e.g. for buffer capture.
///
/// Unlike [`Context`](crate::Context) and [`Scan`](crate::Scan), creation
/// is not routed through the error gate: libiio's allocator is the only
/// way this can fail, and a zero channel count is a valid, empty mask.
pub struct ChannelsMask {
    handle: OwnedHandle<iio_channels_mask>,
    n_channels: u32,
}

impl ChannelsMask {
    /// Allocate a mask able to hold `n_channels` channels, all deselected.
    pub fn new(n_channels: u32) -> Self {
        // SAFETY: plain allocation, no preconditions
        let raw = unsafe { iio_sys::iio_create_channels_mask(n_channels) };

        // SAFETY: raw is freshly allocated (or null, which yields an empty
        // owner) and owned by nobody else
        let handle = unsafe {
            OwnedHandle::from_raw(raw, iio_sys::iio_channels_mask_destroy, "channels_mask")
        };

        debug!(n_channels, "Created channel mask");

        Self { handle, n_channels }
    }

    pub(crate) fn as_ptr(&self) -> *mut iio_channels_mask {
        self.handle.as_ptr()
    }

    /// Number of channels the mask was sized for.
    pub fn n_channels(&self) -> u32 {
        self.n_channels
    }

    /// Whether libiio actually allocated the mask.
    pub fn is_valid(&self) -> bool {
        !self.handle.is_empty()
    }
}

impl std::fmt::Debug for ChannelsMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelsMask")
            .field("n_channels", &self.n_channels)
            .field("valid", &self.is_valid())
            .finish()
    }
}

/// Allocate a channel mask; see [`ChannelsMask::new`].
pub fn create_channels_mask(n_channels: u32) -> ChannelsMask {
    ChannelsMask::new(n_channels)
}
