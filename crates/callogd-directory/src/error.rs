use std::fmt;

/// Result type for directory lookups.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes for a directory lookup. Both variants are transient from
/// the generation pipeline's point of view: the `ParticipantsProcessor`
/// treats either as "not found" for the affected entity and continues
/// (§4.4, §7 `DirectoryUnavailable`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The directory service could not be reached or returned an error.
    Unavailable(String),
    /// The caller's deadline for this lookup had already elapsed.
    DeadlineExceeded,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Unavailable(detail) => write!(f, "directory unavailable: {}", detail),
            Error::DeadlineExceeded => write!(f, "directory lookup deadline exceeded"),
        }
    }
}

impl std::error::Error for Error {}
