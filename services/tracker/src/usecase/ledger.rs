use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{DiagnosticSink, FailedRequestRepository};
use crate::domain::types::{FailedRequest, RequestStatus};
use crate::error::TrackerError;

// ── RecordFailedRequest ──────────────────────────────────────────────────────

pub struct RecordFailedRequestInput {
    pub module_id: String,
    pub endpoint: String,
    pub payload: serde_json::Value,
    pub priority: i32,
    pub error_message: String,
    pub verb: String,
    /// Callers pass `false` only for endpoints the remote service serves
    /// anonymously.
    pub require_auth: bool,
}

pub struct RecordFailedRequestUseCase<R: FailedRequestRepository, D: DiagnosticSink> {
    pub repo: R,
    pub diag: D,
}

impl<R: FailedRequestRepository, D: DiagnosticSink> RecordFailedRequestUseCase<R, D> {
    pub async fn execute(&self, input: RecordFailedRequestInput) -> Result<(), TrackerError> {
        if input.module_id.trim().is_empty() || input.endpoint.trim().is_empty() {
            return Err(TrackerError::EmptyRequestKey);
        }
        let request = FailedRequest {
            id: Uuid::now_v7(),
            module_id: input.module_id,
            endpoint: input.endpoint,
            payload: input.payload,
            priority: input.priority,
            retry_attempts: 0,
            status: RequestStatus::Failed,
            error_message: input.error_message,
            verb: input.verb,
            require_auth: input.require_auth,
            created_at: Utc::now(),
        };
        match self.repo.insert_if_absent(&request).await {
            // `false` means a row for this key is already queued; the first
            // failure wins and later ones are a successful no-op.
            Ok(_) => Ok(()),
            Err(e) => {
                self.diag.record(
                    &format!(
                        "failed to queue request for module {}, endpoint {}",
                        request.module_id, request.endpoint
                    ),
                    "INSERT_RECORD_FAILED",
                );
                Err(e)
            }
        }
    }
}

// ── ListQueuedRequests ───────────────────────────────────────────────────────

/// Read side for the external retry worker and admin inspection.
pub struct ListQueuedRequestsUseCase<R: FailedRequestRepository> {
    pub repo: R,
}

impl<R: FailedRequestRepository> ListQueuedRequestsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<FailedRequest>, TrackerError> {
        self.repo.list_unresolved().await
    }
}
