use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{
    DiagnosticSink, EulaAcceptanceRepository, EulaConfigRepository, UserMarkerRepository,
};
use crate::domain::types::{EULA_DEFAULT_VERSION, EulaAcceptance};
use crate::error::TrackerError;

/// Missing config is a normal startup state, not an error.
async fn current_version<C: EulaConfigRepository>(config: &C) -> Result<String, TrackerError> {
    Ok(config
        .version()
        .await?
        .unwrap_or_else(|| EULA_DEFAULT_VERSION.to_owned()))
}

// ── SetEulaVersion ───────────────────────────────────────────────────────────

pub struct SetEulaVersionUseCase<C: EulaConfigRepository, D: DiagnosticSink> {
    pub config: C,
    pub diag: D,
}

impl<C: EulaConfigRepository, D: DiagnosticSink> SetEulaVersionUseCase<C, D> {
    pub async fn execute(&self, version: &str) -> Result<(), TrackerError> {
        match self.config.set_version(version).await {
            Ok(()) => Ok(()),
            Err(e) => {
                let code = match &e {
                    TrackerError::ConfigInsertFailed(_) => "INSERT_RECORD_FAILED",
                    _ => "UPDATE_RECORD_FAILED",
                };
                self.diag
                    .record(&format!("could not store eula version {version}"), code);
                Err(e)
            }
        }
    }
}

// ── GetEulaVersion ───────────────────────────────────────────────────────────

pub struct GetEulaVersionUseCase<C: EulaConfigRepository> {
    pub config: C,
}

impl<C: EulaConfigRepository> GetEulaVersionUseCase<C> {
    pub async fn execute(&self) -> Result<String, TrackerError> {
        current_version(&self.config).await
    }
}

// ── IsEulaUpToDate ───────────────────────────────────────────────────────────

pub struct IsEulaUpToDateUseCase<U, C, A>
where
    U: UserMarkerRepository,
    C: EulaConfigRepository,
    A: EulaAcceptanceRepository,
{
    pub users: U,
    pub config: C,
    pub acceptances: A,
}

impl<U, C, A> IsEulaUpToDateUseCase<U, C, A>
where
    U: UserMarkerRepository,
    C: EulaConfigRepository,
    A: EulaAcceptanceRepository,
{
    pub async fn execute(&self, user_id: &str) -> Result<bool, TrackerError> {
        // Unknown users are never up to date.
        if !self.users.exists(user_id).await? {
            return Ok(false);
        }
        let version = current_version(&self.config).await?;
        self.acceptances.has_accepted(user_id, &version).await
    }
}

// ── RecordEulaAcceptance ─────────────────────────────────────────────────────

pub struct RecordEulaAcceptanceUseCase<U, C, A, D>
where
    U: UserMarkerRepository,
    C: EulaConfigRepository,
    A: EulaAcceptanceRepository,
    D: DiagnosticSink,
{
    pub users: U,
    pub config: C,
    pub acceptances: A,
    pub diag: D,
}

impl<U, C, A, D> RecordEulaAcceptanceUseCase<U, C, A, D>
where
    U: UserMarkerRepository,
    C: EulaConfigRepository,
    A: EulaAcceptanceRepository,
    D: DiagnosticSink,
{
    /// Idempotent per version: accepting a version the user already accepted
    /// leaves storage unchanged.
    pub async fn execute(&self, user_id: &str) -> Result<(), TrackerError> {
        if user_id.trim().is_empty() {
            return Err(TrackerError::EmptyUserId);
        }
        if let Err(e) = self.users.ensure(user_id).await {
            self.diag.record(
                &format!("cannot create user record for user {user_id}"),
                "INSERT_RECORD_FAILED",
            );
            return Err(e);
        }
        let version = current_version(&self.config).await?;
        if self.acceptances.has_accepted(user_id, &version).await? {
            return Ok(());
        }
        let acceptance = EulaAcceptance {
            id: Uuid::now_v7(),
            user_id: user_id.to_owned(),
            version,
            is_synced: false,
            accepted_at: Utc::now(),
        };
        match self.acceptances.insert_if_absent(&acceptance).await {
            // `false` means a concurrent caller recorded it first; same outcome.
            Ok(_) => Ok(()),
            Err(e) => {
                self.diag.record(
                    &format!("cannot create eula acceptance for user {user_id}"),
                    "INSERT_RECORD_FAILED",
                );
                Err(e)
            }
        }
    }
}
