//! CEL-to-call-log generation: interpretor dispatch, participant/tenant/
//! extension enrichment, and finalization.
//!
//! The public entry point is [`CallLogsGenerator::from_cel`]. Everything
//! else in this crate exists to support that one call: an ordered
//! [`interpretors::Interpretor`] set classifies a linked-id group's call
//! shape, [`participants::ParticipantsProcessor`] reconciles it against a
//! directory service, and the [`finalizers`] passes fix up tenant,
//! extension, and recording state before validation.

mod error;
mod finalizers;
mod generator;
mod interpretors;
mod participants;

pub use error::{Error, Result};
pub use generator::{CallLogsCreation, CallLogsGenerator, SkippedGroup, TenantContradiction};
pub use interpretors::{default_interpretors, Interpretor};
pub use participants::ParticipantsProcessor;

pub use finalizers::{
    ensure_tenant_uuid, fill_extensions_from_participants, remove_duplicate_participants,
    remove_incomplete_recordings,
};
