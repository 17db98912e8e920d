//! Offline copies of a channel's attributes.
//!
//! A [`ChannelSnapshot`] stores attribute text read once from a live
//! [`Channel`]. It implements [`AttributeSource`], so
//! [`value`](crate::value::value) can be evaluated on recorded data long
//! after the context is gone.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::attr::{parse_double, AttributeSource, ReadAttribute};
use crate::channel::Channel;
use crate::error::Result;

/// Attribute values of one channel at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelSnapshot {
    /// Channel ID (e.g. "voltage0")
    pub id: String,
    /// Attribute name to raw text
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Attributes that exist but could not be read at capture time
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unreadable: Vec<String>,
}

impl ChannelSnapshot {
    /// An empty snapshot for channel `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attrs: BTreeMap::new(),
            unreadable: Vec::new(),
        }
    }

    /// Add or replace an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Read every attribute of `channel`.
    ///
    /// Attributes whose read fails are left out of `attrs` and listed in
    /// `unreadable`; many drivers expose attributes that only read back in
    /// certain device states.
    pub fn capture(channel: &Channel<'_>) -> Result<Self> {
        let snapshot = Self::from_reads(
            channel.id(),
            channel.attrs().map(|attr| (attr.name(), attr.read_string())),
        );
        debug!(
            channel = %snapshot.id,
            attrs = snapshot.attrs.len(),
            unreadable = snapshot.unreadable.len(),
            "Captured channel snapshot"
        );
        Ok(snapshot)
    }

    /// Build a snapshot from attribute reads, keeping failed names aside.
    pub(crate) fn from_reads<I>(id: String, reads: I) -> Self
    where
        I: IntoIterator<Item = (String, Result<String>)>,
    {
        let mut snapshot = Self::new(id);
        for (name, read) in reads {
            match read {
                Ok(text) => {
                    snapshot.attrs.insert(name, text);
                }
                Err(e) => {
                    warn!(channel = %snapshot.id, attr = %name, error = %e, "Attribute read failed");
                    snapshot.unreadable.push(name);
                }
            }
        }
        snapshot
    }

    /// Physical value computed from the recorded attributes.
    pub fn value(&self) -> Result<f64> {
        crate::value::value(self)
    }
}

/// A recorded attribute.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotAttr<'a> {
    name: &'a str,
    text: &'a str,
}

impl<'a> SnapshotAttr<'a> {
    /// Attribute name.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Recorded text.
    pub fn text(&self) -> &'a str {
        self.text
    }
}

impl ReadAttribute for SnapshotAttr<'_> {
    fn read_double(&self) -> Result<f64> {
        parse_double(self.name, self.text)
    }
}

impl AttributeSource for ChannelSnapshot {
    type Attr<'a> = SnapshotAttr<'a> where Self: 'a;

    fn find_attr(&self, name: &str) -> Option<SnapshotAttr<'_>> {
        self.attrs
            .get_key_value(name)
            .map(|(name, text)| SnapshotAttr { name, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IioError;

    #[test]
    fn test_find_missing_attr_is_none() {
        let snap = ChannelSnapshot::new("voltage0").with_attr("raw", "12");
        assert!(snap.find_attr("scale").is_none());
        assert!(snap.find_attr("").is_none());
    }

    #[test]
    fn test_find_attr_reads_text() {
        let snap = ChannelSnapshot::new("voltage0").with_attr("scale", "0.25");
        let attr = snap.find_attr("scale").unwrap();
        assert_eq!(attr.name(), "scale");
        assert_eq!(attr.text(), "0.25");
        assert_eq!(attr.read_double().unwrap(), 0.25);
    }

    #[test]
    fn test_deserialize_from_json() {
        let snap: ChannelSnapshot = serde_json::from_str(
            r#"{"id":"in_temp","attrs":{"raw":"100","scale":"2","offset":"10"}}"#,
        )
        .unwrap();
        assert_eq!(snap.id, "in_temp");
        assert!((snap.value().unwrap() - 0.22).abs() < 1e-12);
    }

    #[test]
    fn test_failed_reads_do_not_abort_capture() {
        let reads = vec![
            ("raw".to_string(), Ok("100".to_string())),
            (
                "calibbias".to_string(),
                Err(IioError::Call {
                    operation: "iio_attr_read_raw",
                    errno: libc::EIO,
                }),
            ),
            ("scale".to_string(), Ok("2".to_string())),
        ];

        let snap = ChannelSnapshot::from_reads("voltage0".to_string(), reads);
        assert_eq!(snap.attrs.len(), 2);
        assert!(snap.find_attr("calibbias").is_none());
        assert_eq!(snap.unreadable, vec!["calibbias".to_string()]);
        assert!((snap.value().unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_deserialize_without_attrs() {
        let snap: ChannelSnapshot = serde_json::from_str(r#"{"id":"voltage1"}"#).unwrap();
        assert!(snap.attrs.is_empty());
        assert!(snap.unreadable.is_empty());
        assert!(snap.value().unwrap_err().is_not_found());
    }
}
