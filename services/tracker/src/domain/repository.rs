#![allow(async_fn_in_trait)]

use crate::domain::types::{EulaAcceptance, FailedRequest};
use crate::error::TrackerError;

/// Repository for the failed-request queue.
pub trait FailedRequestRepository: Send + Sync {
    async fn find(
        &self,
        module_id: &str,
        endpoint: &str,
    ) -> Result<Option<FailedRequest>, TrackerError>;

    /// Insert unless a row already exists for `(module_id, endpoint)`.
    /// Returns `true` if a row was written.
    async fn insert_if_absent(&self, request: &FailedRequest) -> Result<bool, TrackerError>;

    /// Rows not yet resolved, ordered by priority value, oldest first within
    /// a priority.
    async fn list_unresolved(&self) -> Result<Vec<FailedRequest>, TrackerError>;
}

/// Repository for the plugin config row holding the required EULA version.
pub trait EulaConfigRepository: Send + Sync {
    async fn version(&self) -> Result<Option<String>, TrackerError>;

    /// Update the config row in place, inserting it on first use.
    async fn set_version(&self, version: &str) -> Result<(), TrackerError>;
}

/// Repository for user marker rows.
pub trait UserMarkerRepository: Send + Sync {
    async fn exists(&self, user_id: &str) -> Result<bool, TrackerError>;

    /// Insert a marker row if absent. Returns `true` if one was created.
    async fn ensure(&self, user_id: &str) -> Result<bool, TrackerError>;
}

/// Repository for per-user EULA acceptance history.
pub trait EulaAcceptanceRepository: Send + Sync {
    async fn has_accepted(&self, user_id: &str, version: &str) -> Result<bool, TrackerError>;

    /// Insert unless the user already accepted this version. Returns `true`
    /// if a row was written.
    async fn insert_if_absent(&self, acceptance: &EulaAcceptance) -> Result<bool, TrackerError>;
}

/// Port for the host's diagnostic log sink. Recording must never fail the
/// operation that emits the event.
pub trait DiagnosticSink: Send + Sync {
    fn record(&self, message: &str, code: &str);
}
