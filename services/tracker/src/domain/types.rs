use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Scope used for plugin-wide config rows that are not tied to a single
/// course module.
pub const DEFAULT_MODULE_ID: &str = "0";

/// Config field holding the EULA version users are required to accept.
pub const EULA_FIELD_NAME: &str = "eula_version";

/// Version reported before the remote service has ever published one.
pub const EULA_DEFAULT_VERSION: &str = "1.0";

/// Lifecycle status of a queued request. Only `Failed` is ever written here;
/// the external retry worker owns the other transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Failed,
    Pending,
    Resolved,
}

impl RequestStatus {
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Failed => 0,
            Self::Pending => 1,
            Self::Resolved => 2,
        }
    }

    /// Unknown values map to `Failed`.
    pub fn from_i16(value: i16) -> Self {
        match value {
            1 => Self::Pending,
            2 => Self::Resolved,
            _ => Self::Failed,
        }
    }
}

/// A failed outbound request awaiting retry, keyed by `(module_id, endpoint)`.
#[derive(Debug, Clone, Serialize)]
pub struct FailedRequest {
    pub id: Uuid,
    pub module_id: String,
    pub endpoint: String,
    pub payload: serde_json::Value,
    pub priority: i32,
    pub retry_attempts: i32,
    pub status: RequestStatus,
    pub error_message: String,
    pub verb: String,
    pub require_auth: bool,
    #[serde(serialize_with = "simcheck_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

/// One accepted EULA version for one host user.
#[derive(Debug, Clone)]
pub struct EulaAcceptance {
    pub id: Uuid,
    pub user_id: String,
    pub version: String,
    pub is_synced: bool,
    pub accepted_at: DateTime<Utc>,
}
