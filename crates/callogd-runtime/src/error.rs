use std::fmt;

/// Result type for `callogd-runtime` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the orchestration layer: configuration I/O on top of
/// whatever the core generation pipeline itself reports.
#[derive(Debug)]
pub enum Error {
    /// Generation failed (§7 `NoInterpretorMatched`).
    Core(callogd_core::Error),
    /// Configuration file I/O failed.
    Io(std::io::Error),
    /// Configuration content could not be parsed or serialized.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Core(err) => write!(f, "generation error: {}", err),
            Error::Io(err) => write!(f, "io error: {}", err),
            Error::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Core(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_) => None,
        }
    }
}

impl From<callogd_core::Error> for Error {
    fn from(err: callogd_core::Error) -> Self {
        Error::Core(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
