//! Directory-service contract for the call-log generation pipeline.
//!
//! This crate has no transport implementation: it defines the
//! `DirectoryClient` trait (§6) that a caller wires up to the real "confd"
//! service, the value types it returns, and a per-invocation memoizing
//! cache (§4.4, §9) the generation pipeline wraps it in.

pub mod cache;
pub mod client;
pub mod error;
pub mod model;

pub use cache::{DirectoryCache, Lookup};
pub use client::DirectoryClient;
pub use error::{Error, Result};
pub use model::{ContextInfo, ParticipantInfo};
