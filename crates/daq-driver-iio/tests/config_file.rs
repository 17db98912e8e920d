//! Loading libiio connection settings from disk.

use std::io::Write;

use daq_driver_iio::{IioConfig, IioError, LogLevel};
use tempfile::NamedTempFile;

#[test]
fn test_load_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
uri = "usb:1.2.5"
timeout_ms = 500
log_level = "error"
"#
    )
    .unwrap();

    let config = IioConfig::load(file.path()).unwrap();
    assert_eq!(config.uri.as_deref(), Some("usb:1.2.5"));
    assert_eq!(config.backends, None);
    assert_eq!(config.log_level, LogLevel::Error);

    let raw = config.context_params().to_raw();
    assert_eq!(raw.timeout_ms, 500);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = IioConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, IioError::StdIoError(_)));
    assert_eq!(err.errno(), libc::ENOENT);
}

#[test]
fn test_malformed_file_is_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "timeout_ms = \"soon\"").unwrap();

    let err = IioConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, IioError::InvalidConfig { .. }));
}
