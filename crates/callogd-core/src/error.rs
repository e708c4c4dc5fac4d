use std::fmt;

use callogd_types::Error as TypesError;

/// Result type for `callogd-core` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The two ways a generation run can fail, per §7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A `RawCallLog` failed `to_call_log` validation. Callers of
    /// `CallLogsGenerator::from_cel` never see this directly — the
    /// generator catches it per group and reports the skip in
    /// `CallLogsCreation::skipped` instead (§4.1 step 7).
    InvalidCallLog(String),
    /// No interpretor in the ordered list accepted a non-empty group.
    /// Fatal to the whole batch: `InternalInterpretor` accepting
    /// everything non-empty means this only arises for an empty group
    /// (§4.2, §8 S5), and is treated as a coding defect rather than a
    /// data error.
    NoInterpretorMatched,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCallLog(reason) => write!(f, "invalid call log: {}", reason),
            Error::NoInterpretorMatched => write!(f, "no interpretor matched a non-empty CEL group"),
        }
    }
}

impl std::error::Error for Error {}

impl From<TypesError> for Error {
    fn from(err: TypesError) -> Self {
        match err {
            TypesError::InvalidCallLog(reason) => Error::InvalidCallLog(reason),
        }
    }
}
