use std::fmt;

/// Result type for callogd-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while finalizing a raw call log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A `RawCallLog` could not be converted into a persistable `CallLog`
    /// because a mandatory field was absent.
    InvalidCallLog(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCallLog(reason) => write!(f, "invalid call log: {}", reason),
        }
    }
}

impl std::error::Error for Error {}
