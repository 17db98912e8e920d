//! Attribute access for contexts, devices and channels.
//!
//! An [`Attribute`] is a transient view: it remembers its owner and its
//! name, and looks itself up again on every read or write. Lookups that
//! find nothing return `None`; only a failing read or write is an error.

use std::ffi::CString;
use std::os::raw::c_char;

use iio_sys::iio_attr;

use crate::channel::Channel;
use crate::check::{check_status, from_c_str, to_cstring};
use crate::context::Context;
use crate::device::Device;
use crate::error::{IioError, Result};

/// Largest attribute value libiio hands out (one sysfs page).
const ATTR_BUF_LEN: usize = 4096;

/// Something on which attributes can be looked up by name.
///
/// Implemented by live [`Channel`]s and by offline
/// [`ChannelSnapshot`](crate::snapshot::ChannelSnapshot)s, so that
/// [`value`](crate::value::value) works with either.
pub trait AttributeSource {
    /// Attribute view returned by [`find_attr`](Self::find_attr).
    type Attr<'a>: ReadAttribute
    where
        Self: 'a;

    /// Look up an attribute by name. Absence is `None`, never an error.
    fn find_attr(&self, name: &str) -> Option<Self::Attr<'_>>;
}

/// Numeric read access to an attribute.
pub trait ReadAttribute {
    /// Read the attribute and parse it as a decimal number.
    fn read_double(&self) -> Result<f64>;
}

/// Parse attribute text the way sysfs formats numbers.
pub(crate) fn parse_double(attr: &str, text: &str) -> Result<f64> {
    text.trim().parse::<f64>().map_err(|_| IioError::Parse {
        attr: attr.to_string(),
        value: text.to_string(),
    })
}

/// Parse an integer attribute; accepts decimal and `0x`-prefixed hex.
pub(crate) fn parse_i64(attr: &str, text: &str) -> Result<i64> {
    let parse_error = || IioError::Parse {
        attr: attr.to_string(),
        value: text.to_string(),
    };

    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };

    // Exactly one optional sign, in front of any 0x prefix
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(parse_error());
    }

    let magnitude = i64::from_str_radix(digits, radix).map_err(|_| parse_error())?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// The object an attribute belongs to.
#[derive(Debug, Clone, Copy)]
pub enum AttrOwner<'ctx> {
    /// Context-level attribute
    Context(&'ctx Context),
    /// Device attribute
    Device(Device<'ctx>),
    /// Channel attribute
    Channel(Channel<'ctx>),
}

impl<'ctx> AttrOwner<'ctx> {
    fn find_raw(&self, name: &CString) -> *const iio_attr {
        // SAFETY: the owner's raw pointer is valid for 'ctx and name is
        // NUL-terminated.
        unsafe {
            match self {
                Self::Context(ctx) => iio_sys::iio_context_find_attr(ctx.as_ptr(), name.as_ptr()),
                Self::Device(dev) => iio_sys::iio_device_find_attr(dev.as_ptr(), name.as_ptr()),
                Self::Channel(chn) => iio_sys::iio_channel_find_attr(chn.as_ptr(), name.as_ptr()),
            }
        }
    }
}

/// A named attribute on a context, device or channel.
///
/// Borrowed from the [`Context`] it was found in and cannot outlive it.
#[derive(Clone)]
pub struct Attribute<'ctx> {
    owner: AttrOwner<'ctx>,
    name: CString,
}

impl<'ctx> Attribute<'ctx> {
    /// Look up `name` on `owner`; `None` if no such attribute exists.
    pub fn find(owner: AttrOwner<'ctx>, name: &str) -> Option<Self> {
        // A name with an interior NUL cannot exist in libiio.
        let name = CString::new(name).ok()?;
        if owner.find_raw(&name).is_null() {
            return None;
        }
        Some(Self { owner, name })
    }

    /// Wrap an attribute obtained by index from its owner.
    ///
    /// # Safety
    ///
    /// `raw` must be a non-null attribute belonging to `owner`.
    pub(crate) unsafe fn from_indexed(owner: AttrOwner<'ctx>, raw: *const iio_attr) -> Option<Self> {
        if raw.is_null() {
            return None;
        }
        let name = std::ffi::CStr::from_ptr(iio_sys::iio_attr_get_name(raw)).to_owned();
        Some(Self { owner, name })
    }

    fn resolve(&self) -> Result<*const iio_attr> {
        let raw = self.owner.find_raw(&self.name);
        if raw.is_null() {
            return Err(IioError::not_found(format!(
                "attribute '{}' no longer exists",
                self.name()
            )));
        }
        Ok(raw)
    }

    /// Attribute name.
    pub fn name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }

    /// The object this attribute belongs to.
    pub fn owner(&self) -> AttrOwner<'ctx> {
        self.owner
    }

    /// Backing sysfs file name, if the backend exposes one.
    pub fn filename(&self) -> Result<Option<String>> {
        let raw = self.resolve()?;
        // SAFETY: raw was just resolved against a live owner
        Ok(unsafe { from_c_str(iio_sys::iio_attr_get_filename(raw)) })
    }

    /// Read the raw attribute text from the device.
    pub fn read_string(&self) -> Result<String> {
        let raw = self.resolve()?;
        let mut buf = vec![0u8; ATTR_BUF_LEN];

        // SAFETY: buf is writable for ATTR_BUF_LEN bytes
        let ret = unsafe {
            iio_sys::iio_attr_read_raw(raw, buf.as_mut_ptr() as *mut c_char, buf.len())
        };
        let len = check_status(ret, "iio_attr_read_raw")?;

        let len = usize::try_from(len).unwrap_or(0).min(buf.len());
        let text = &buf[..len];
        let end = text.iter().position(|&b| b == 0).unwrap_or(text.len());
        Ok(String::from_utf8_lossy(&text[..end]).trim_end().to_string())
    }

    /// Read the attribute as a floating-point number.
    pub fn read_double(&self) -> Result<f64> {
        parse_double(&self.name(), &self.read_string()?)
    }

    /// Read the attribute as an integer.
    pub fn read_i64(&self) -> Result<i64> {
        parse_i64(&self.name(), &self.read_string()?)
    }

    /// Read the attribute as a boolean (any non-zero integer is true).
    pub fn read_bool(&self) -> Result<bool> {
        Ok(self.read_i64()? != 0)
    }

    /// Write a string value. Returns the number of bytes written.
    pub fn write_str(&self, value: &str) -> Result<usize> {
        let raw = self.resolve()?;
        let value = to_cstring(value, "attribute value")?;

        // SAFETY: raw is live and value is NUL-terminated
        let ret = unsafe { iio_sys::iio_attr_write_string(raw, value.as_ptr()) };
        let written = check_status(ret, "iio_attr_write_string")?;
        Ok(usize::try_from(written).unwrap_or(0))
    }

    /// Write a floating-point value.
    pub fn write_double(&self, value: f64) -> Result<usize> {
        self.write_str(&value.to_string())
    }

    /// Write an integer value.
    pub fn write_i64(&self, value: i64) -> Result<usize> {
        self.write_str(&value.to_string())
    }

    /// Write a boolean value as `1` or `0`.
    pub fn write_bool(&self, value: bool) -> Result<usize> {
        self.write_str(if value { "1" } else { "0" })
    }
}

impl ReadAttribute for Attribute<'_> {
    fn read_double(&self) -> Result<f64> {
        Attribute::read_double(self)
    }
}

impl std::fmt::Debug for Attribute<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_double() {
        assert_eq!(parse_double("raw", "5000").unwrap(), 5000.0);
        assert_eq!(parse_double("scale", "0.000732421\n").unwrap(), 0.000732421);
        assert_eq!(parse_double("offset", " -12.5 ").unwrap(), -12.5);
        assert_eq!(parse_double("scale", "1e-3").unwrap(), 0.001);
    }

    #[test]
    fn test_parse_double_rejects_text() {
        let err = parse_double("raw", "n/a").unwrap_err();
        assert!(matches!(err, IioError::Parse { .. }));
        assert!(err.to_string().contains("n/a"));
    }

    #[test]
    fn test_parse_i64() {
        assert_eq!(parse_i64("sampling_frequency", "1000\n").unwrap(), 1000);
        assert_eq!(parse_i64("mask", "0x1f").unwrap(), 31);
        assert_eq!(parse_i64("offset", "-0x10").unwrap(), -16);
        assert_eq!(parse_i64("offset", "-7").unwrap(), -7);
        assert_eq!(parse_i64("offset", "+12").unwrap(), 12);
        assert!(parse_i64("en", "yes").is_err());
    }

    #[test]
    fn test_parse_i64_rejects_repeated_sign() {
        for text in ["--5", "-+5", "+-5", "++5", "0x-5", "-0x+1f", "-", "0x", ""] {
            let err = parse_i64("offset", text).unwrap_err();
            assert!(matches!(err, IioError::Parse { .. }), "accepted {:?}", text);
        }
    }
}
