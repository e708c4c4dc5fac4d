//! Data model for the CEL-to-call-log generation pipeline.
//!
//! This crate has no I/O: it defines the immutable `Cel` input record, the
//! mutable `RawCallLog` accumulator interpretors and finalizer passes mutate
//! in place, and the durable `CallLog` record produced at the end.

pub mod call_log;
pub mod cel;
pub mod error;
pub mod raw_call_log;

pub use call_log::{CallLog, CallLogParticipant, Direction, LineId, MainExtension, Recording, Role};
pub use cel::{protocol_interface_from_channel, Cel, EventType};
pub use error::{Error, Result};
pub use raw_call_log::{ParticipantInfoEntry, RawCallLog, RawParticipant};
