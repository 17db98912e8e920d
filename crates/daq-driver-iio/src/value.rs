//! Physical value of a channel from its sysfs attributes.
//!
//! IIO drivers either report a processed reading (`input`) or a raw
//! converter count (`raw`) together with optional `scale` and `offset`
//! attributes. Both are in milli-units (mV, m°C, ...).

use crate::attr::{AttributeSource, ReadAttribute};
use crate::error::{IioError, Result};

/// Divisor from the milli-units IIO reports to base units.
pub const MILLI_PER_UNIT: f64 = 1000.0;

/// Compute a channel's value in base units.
///
/// 1. `input` present: `input / 1000`. No calibration is applied.
/// 2. Otherwise `scale` (default 1.0) and `offset` (default 0.0) are read.
/// 3. `raw` present: `(raw + offset) * scale / 1000`.
/// 4. Neither `input` nor `raw`: [`IioError::NotFound`].
///
/// A failed read of an attribute that exists is returned as an error and
/// never replaced by a default.
pub fn value<C>(channel: &C) -> Result<f64>
where
    C: AttributeSource + ?Sized,
{
    if let Some(attr) = channel.find_attr("input") {
        return Ok(attr.read_double()? / MILLI_PER_UNIT);
    }

    let scale = match channel.find_attr("scale") {
        Some(attr) => attr.read_double()?,
        None => 1.0,
    };

    let offset = match channel.find_attr("offset") {
        Some(attr) => attr.read_double()?,
        None => 0.0,
    };

    if let Some(attr) = channel.find_attr("raw") {
        return Ok((attr.read_double()? + offset) * scale / MILLI_PER_UNIT);
    }

    Err(IioError::not_found("channel does not provide raw value"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ChannelSnapshot;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_input_is_divided_by_1000() {
        let chn = ChannelSnapshot::new("temp").with_attr("input", "5000");
        assert!(approx_eq(value(&chn).unwrap(), 5.0));
    }

    #[test]
    fn test_input_ignores_calibration() {
        let chn = ChannelSnapshot::new("temp")
            .with_attr("input", "5000")
            .with_attr("raw", "1")
            .with_attr("scale", "2")
            .with_attr("offset", "10");
        assert!(approx_eq(value(&chn).unwrap(), 5.0));
    }

    #[test]
    fn test_raw_with_scale_and_offset() {
        let chn = ChannelSnapshot::new("voltage0")
            .with_attr("raw", "100")
            .with_attr("scale", "2")
            .with_attr("offset", "10");
        assert!(approx_eq(value(&chn).unwrap(), 0.22));
    }

    #[test]
    fn test_raw_defaults() {
        let chn = ChannelSnapshot::new("voltage0").with_attr("raw", "50");
        assert!(approx_eq(value(&chn).unwrap(), 0.05));
    }

    #[test]
    fn test_raw_with_scale_only() {
        let chn = ChannelSnapshot::new("voltage0")
            .with_attr("raw", "4095")
            .with_attr("scale", "0.5");
        assert!(approx_eq(value(&chn).unwrap(), 2.0475));
    }

    #[test]
    fn test_raw_with_offset_only() {
        let chn = ChannelSnapshot::new("temp")
            .with_attr("raw", "-20")
            .with_attr("offset", "30");
        assert!(approx_eq(value(&chn).unwrap(), 0.01));
    }

    #[test]
    fn test_no_value_is_not_found() {
        let chn = ChannelSnapshot::new("voltage0")
            .with_attr("scale", "2")
            .with_attr("offset", "10");
        let err = value(&chn).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.errno(), libc::ENOENT);
        assert!(err.to_string().contains("channel does not provide raw value"));
    }

    #[test]
    fn test_unparseable_scale_is_an_error() {
        let chn = ChannelSnapshot::new("voltage0")
            .with_attr("raw", "100")
            .with_attr("scale", "fast");
        let err = value(&chn).unwrap_err();
        assert!(matches!(err, IioError::Parse { .. }));
        assert!(!err.is_not_found());
    }
}
