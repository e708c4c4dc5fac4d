//! Orchestration layer for the call-log generation pipeline.
//!
//! Ties [`callogd_core::CallLogsGenerator`] to the collaborators it needs
//! but does not implement itself: a [`CelStore`], a
//! [`callogd_directory::DirectoryClient`], and a [`CallLogEventBus`]. No
//! transport or persistence implementation ships here — see §6.

mod config;
mod error;
mod events;
mod regenerate;
mod store;

pub use config::{resolve_config_dir, Config};
pub use error::{Error, Result};
pub use events::{
    call_log_created_payload, call_log_user_created_payloads, CallLogCreatedPayload,
    CallLogEventBus, CallLogUserCreatedPayload,
};
pub use regenerate::regenerate;
pub use store::CelStore;
