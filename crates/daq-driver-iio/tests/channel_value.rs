//! Channel value resolution against a scripted attribute source.

use std::cell::RefCell;
use std::collections::HashMap;

use daq_driver_iio::{value, AttributeSource, ChannelSnapshot, IioError, ReadAttribute, Result};

/// Attribute whose read either yields text or fails like a driver would.
#[derive(Clone)]
enum Scripted {
    Text(&'static str),
    ReadFails(i32),
}

/// Channel that records which attributes were looked up and read.
#[derive(Default)]
struct ScriptedChannel {
    attrs: HashMap<&'static str, Scripted>,
    lookups: RefCell<Vec<String>>,
    reads: RefCell<Vec<String>>,
}

impl ScriptedChannel {
    fn with(mut self, name: &'static str, attr: Scripted) -> Self {
        self.attrs.insert(name, attr);
        self
    }
}

struct ScriptedAttr<'a> {
    name: &'static str,
    attr: Scripted,
    channel: &'a ScriptedChannel,
}

impl ReadAttribute for ScriptedAttr<'_> {
    fn read_double(&self) -> Result<f64> {
        self.channel.reads.borrow_mut().push(self.name.to_string());
        match &self.attr {
            Scripted::Text(text) => text.parse().map_err(|_| IioError::Parse {
                attr: self.name.to_string(),
                value: text.to_string(),
            }),
            Scripted::ReadFails(errno) => Err(IioError::Call {
                operation: "iio_attr_read_raw",
                errno: *errno,
            }),
        }
    }
}

impl AttributeSource for ScriptedChannel {
    type Attr<'a> = ScriptedAttr<'a> where Self: 'a;

    fn find_attr(&self, name: &str) -> Option<ScriptedAttr<'_>> {
        self.lookups.borrow_mut().push(name.to_string());
        self.attrs
            .get_key_value(name)
            .map(|(&name, attr)| ScriptedAttr {
                name,
                attr: attr.clone(),
                channel: self,
            })
    }
}

#[test]
fn test_input_short_circuits() {
    let chn = ScriptedChannel::default()
        .with("input", Scripted::Text("5000"))
        .with("scale", Scripted::ReadFails(libc::EIO));

    assert_eq!(value(&chn).unwrap(), 5.0);
    assert_eq!(*chn.lookups.borrow(), vec!["input"]);
    assert_eq!(*chn.reads.borrow(), vec!["input"]);
}

#[test]
fn test_lookup_order_for_raw() {
    let chn = ScriptedChannel::default()
        .with("raw", Scripted::Text("100"))
        .with("scale", Scripted::Text("2"))
        .with("offset", Scripted::Text("10"));

    let v = value(&chn).unwrap();
    assert!((v - 0.22).abs() < 1e-12);
    assert_eq!(*chn.lookups.borrow(), vec!["input", "scale", "offset", "raw"]);
}

#[test]
fn test_calibration_read_before_missing_raw() {
    let chn = ScriptedChannel::default()
        .with("scale", Scripted::Text("2"))
        .with("offset", Scripted::Text("10"));

    let err = value(&chn).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(*chn.reads.borrow(), vec!["scale", "offset"]);
}

#[test]
fn test_empty_channel_is_not_found() {
    let chn = ScriptedChannel::default();
    let err = value(&chn).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.errno(), libc::ENOENT);
}

#[test]
fn test_failed_input_read_propagates() {
    let chn = ScriptedChannel::default()
        .with("input", Scripted::ReadFails(libc::ETIMEDOUT))
        .with("raw", Scripted::Text("1"));

    let err = value(&chn).unwrap_err();
    assert!(!err.is_not_found());
    assert_eq!(err.operation(), Some("iio_attr_read_raw"));
    assert_eq!(err.errno(), libc::ETIMEDOUT);
}

#[test]
fn test_failed_offset_read_is_not_defaulted() {
    let chn = ScriptedChannel::default()
        .with("raw", Scripted::Text("50"))
        .with("offset", Scripted::ReadFails(libc::EIO));

    let err = value(&chn).unwrap_err();
    assert_eq!(err.errno(), libc::EIO);
    assert!(!chn.reads.borrow().contains(&"raw".to_string()));
}

#[test]
fn test_failed_raw_read_propagates() {
    let chn = ScriptedChannel::default()
        .with("raw", Scripted::ReadFails(libc::ENODEV))
        .with("scale", Scripted::Text("1"));

    assert_eq!(value(&chn).unwrap_err().errno(), libc::ENODEV);
}

#[test]
fn test_find_attr_missing_is_none() {
    let chn = ScriptedChannel::default().with("raw", Scripted::Text("1"));
    assert!(chn.find_attr("input").is_none());
    assert!(chn.find_attr("raw").is_some());
}

#[test]
fn test_snapshot_matches_examples() {
    let input = ChannelSnapshot::new("in_temp0").with_attr("input", "5000");
    assert_eq!(input.value().unwrap(), 5.0);

    let raw = ChannelSnapshot::new("in_voltage0").with_attr("raw", "50");
    assert!((raw.value().unwrap() - 0.05).abs() < 1e-12);

    let none = ChannelSnapshot::new("in_voltage1");
    assert!(none.value().unwrap_err().is_not_found());
}
