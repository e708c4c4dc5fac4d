//! Shared test fixtures for the call-log generation pipeline.
//!
//! `callogd-core` and `callogd-directory` never depend on this crate;
//! only the orchestration layer's tests (and this crate's own tests) do,
//! to keep the dependency graph acyclic.

mod cel_builder;
mod fake_directory;

pub use cel_builder::CelBuilder;
pub use fake_directory::{known_user, known_user_with_extension, FakeDirectoryClient};
