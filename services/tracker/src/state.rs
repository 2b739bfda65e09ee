use anyhow::Context as _;
use sea_orm::{Database, DatabaseConnection};

use crate::config::TrackerConfig;
use crate::domain::repository::FailedRequestRepository as _;
use crate::domain::types::FailedRequest;
use crate::error::TrackerError;
use crate::infra::db::{
    DbEulaAcceptanceRepository, DbEulaConfigRepository, DbFailedRequestRepository,
    DbUserMarkerRepository,
};
use crate::infra::diagnostics::TracingDiagnosticSink;
use crate::usecase::eula::{
    GetEulaVersionUseCase, IsEulaUpToDateUseCase, RecordEulaAcceptanceUseCase,
    SetEulaVersionUseCase,
};
use crate::usecase::ledger::{
    ListQueuedRequestsUseCase, RecordFailedRequestInput, RecordFailedRequestUseCase,
};

/// Shared handle to the tracker's storage, injected into the host plugin's
/// controllers.
#[derive(Clone)]
pub struct Tracker {
    pub db: DatabaseConnection,
}

impl Tracker {
    /// Open a connection pool for the configured database.
    pub async fn connect(config: &TrackerConfig) -> Result<Self, TrackerError> {
        let db = Database::connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    pub fn failed_request_repo(&self) -> DbFailedRequestRepository {
        DbFailedRequestRepository {
            db: self.db.clone(),
        }
    }

    pub fn eula_config_repo(&self) -> DbEulaConfigRepository {
        DbEulaConfigRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_marker_repo(&self) -> DbUserMarkerRepository {
        DbUserMarkerRepository {
            db: self.db.clone(),
        }
    }

    pub fn eula_acceptance_repo(&self) -> DbEulaAcceptanceRepository {
        DbEulaAcceptanceRepository {
            db: self.db.clone(),
        }
    }

    pub fn diagnostic_sink(&self) -> TracingDiagnosticSink {
        TracingDiagnosticSink
    }

    // ── Failed-request queue ─────────────────────────────────────────────────

    /// Queue one failed outbound request for the external retry worker.
    /// Repeated failures for the same `(module_id, endpoint)` key are a
    /// successful no-op; the first recorded failure wins.
    pub async fn record_failed_request(
        &self,
        input: RecordFailedRequestInput,
    ) -> Result<(), TrackerError> {
        let usecase = RecordFailedRequestUseCase {
            repo: self.failed_request_repo(),
            diag: self.diagnostic_sink(),
        };
        usecase.execute(input).await
    }

    /// Look up the queued row for one `(module_id, endpoint)` key, if any.
    pub async fn queued_request(
        &self,
        module_id: &str,
        endpoint: &str,
    ) -> Result<Option<FailedRequest>, TrackerError> {
        self.failed_request_repo().find(module_id, endpoint).await
    }

    /// Queued rows not yet resolved, ordered by priority value then age.
    pub async fn queued_requests(&self) -> Result<Vec<FailedRequest>, TrackerError> {
        let usecase = ListQueuedRequestsUseCase {
            repo: self.failed_request_repo(),
        };
        usecase.execute().await
    }

    // ── EULA tracking ────────────────────────────────────────────────────────

    /// Upsert the required EULA version published by the remote service.
    pub async fn set_eula_version(&self, version: &str) -> Result<(), TrackerError> {
        let usecase = SetEulaVersionUseCase {
            config: self.eula_config_repo(),
            diag: self.diagnostic_sink(),
        };
        usecase.execute(version).await
    }

    /// The required EULA version, or the built-in default when none has been
    /// stored yet.
    pub async fn eula_version(&self) -> Result<String, TrackerError> {
        let usecase = GetEulaVersionUseCase {
            config: self.eula_config_repo(),
        };
        usecase.execute().await
    }

    /// Whether the user has accepted the currently required EULA version.
    pub async fn is_eula_up_to_date(&self, user_id: &str) -> Result<bool, TrackerError> {
        let usecase = IsEulaUpToDateUseCase {
            users: self.user_marker_repo(),
            config: self.eula_config_repo(),
            acceptances: self.eula_acceptance_repo(),
        };
        usecase.execute(user_id).await
    }

    /// Record that the user accepted the current EULA version. Idempotent
    /// per version.
    pub async fn record_eula_acceptance(&self, user_id: &str) -> Result<(), TrackerError> {
        let usecase = RecordEulaAcceptanceUseCase {
            users: self.user_marker_repo(),
            config: self.eula_config_repo(),
            acceptances: self.eula_acceptance_repo(),
            diag: self.diagnostic_sink(),
        };
        usecase.execute(user_id).await
    }
}
