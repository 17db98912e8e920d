//! Error types for libiio operations.
//!
//! Every failure surfaced by this crate is an [`IioError`]. Failed libiio
//! calls carry the name of the C function that failed together with the
//! system error code it reported; the remaining variants cover conditions
//! detected on the Rust side.

use thiserror::Error;

/// Result type alias for libiio operations.
pub type Result<T> = std::result::Result<T, IioError>;

/// Errors that can occur when working with libiio handles.
#[derive(Error, Debug)]
pub enum IioError {
    /// A libiio call reported failure
    #[error("{operation} failed: {} (errno {errno})", describe_errno(*errno))]
    Call {
        /// Name of the libiio function that failed
        operation: &'static str,
        /// System error code reported by the call
        errno: i32,
    },

    /// A required attribute or object does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// An attribute value could not be interpreted as a number
    #[error("Attribute '{attr}' holds non-numeric value '{value}'")]
    Parse { attr: String, value: String },

    /// An argument cannot be passed to libiio (e.g. contains a NUL byte)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Invalid configuration file or value
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// I/O error from the operating system
    #[error("I/O error: {0}")]
    StdIoError(#[from] std::io::Error),
}

fn describe_errno(errno: i32) -> String {
    std::io::Error::from_raw_os_error(errno).to_string()
}

impl IioError {
    /// Create an error from the calling thread's current `errno`.
    ///
    /// Must be called directly after the failing call, before anything
    /// else has a chance to overwrite `errno`.
    pub(crate) fn from_errno(operation: &'static str) -> Self {
        let errno = std::io::Error::last_os_error()
            .raw_os_error()
            .unwrap_or(libc::EIO);
        Self::Call { operation, errno }
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// The system error code this error corresponds to.
    pub fn errno(&self) -> i32 {
        match self {
            Self::Call { errno, .. } => *errno,
            Self::NotFound { .. } => libc::ENOENT,
            Self::Parse { .. } | Self::InvalidArgument { .. } | Self::InvalidConfig { .. } => {
                libc::EINVAL
            }
            Self::StdIoError(e) => e.raw_os_error().unwrap_or(libc::EIO),
        }
    }

    /// Name of the libiio function that failed, if this is a call failure.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Call { operation, .. } => Some(operation),
            _ => None,
        }
    }

    /// Check if this is a "not found" type error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error came from a failed libiio call.
    pub fn is_call_failure(&self) -> bool {
        matches!(self, Self::Call { .. })
    }
}
