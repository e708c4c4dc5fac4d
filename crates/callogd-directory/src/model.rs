use callogd_types::{LineId, MainExtension};
use uuid::Uuid;

/// A directory-resolved participant, keyed either by channel name or by
/// user uuid depending on which `DirectoryClient` method produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantInfo {
    pub uuid: Uuid,
    pub line_id: LineId,
    pub tags: Vec<String>,
    pub tenant_uuid: Uuid,
    pub main_extension: Option<MainExtension>,
}

/// A context returned by `list_contexts`, used by `ensure_tenant_uuid` to
/// recover a tenant from `requested_context` when no participant carried
/// one (§4.5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextInfo {
    pub name: String,
    pub tenant_uuid: Uuid,
}
