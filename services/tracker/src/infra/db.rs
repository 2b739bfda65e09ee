use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel as _, QueryFilter, QueryOrder, sea_query::OnConflict,
};
use uuid::Uuid;

use simcheck_tracker_schema::{eula_acceptances, failed_requests, plugin_config, tracked_users};

use crate::domain::repository::{
    EulaAcceptanceRepository, EulaConfigRepository, FailedRequestRepository, UserMarkerRepository,
};
use crate::domain::types::{
    DEFAULT_MODULE_ID, EULA_FIELD_NAME, EulaAcceptance, FailedRequest, RequestStatus,
};
use crate::error::TrackerError;

// ── Failed-request repository ────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFailedRequestRepository {
    pub db: DatabaseConnection,
}

impl FailedRequestRepository for DbFailedRequestRepository {
    async fn find(
        &self,
        module_id: &str,
        endpoint: &str,
    ) -> Result<Option<FailedRequest>, TrackerError> {
        let model = failed_requests::Entity::find()
            .filter(failed_requests::Column::ModuleId.eq(module_id))
            .filter(failed_requests::Column::Endpoint.eq(endpoint))
            .one(&self.db)
            .await
            .context("find failed request")?;
        Ok(model.map(failed_request_from_model))
    }

    async fn insert_if_absent(&self, request: &FailedRequest) -> Result<bool, TrackerError> {
        let row = failed_requests::ActiveModel {
            id: Set(request.id),
            module_id: Set(request.module_id.clone()),
            endpoint: Set(request.endpoint.clone()),
            payload: Set(request.payload.clone()),
            priority: Set(request.priority),
            retry_attempts: Set(request.retry_attempts),
            status: Set(request.status.as_i16()),
            error_message: Set(request.error_message.clone()),
            verb: Set(request.verb.clone()),
            require_auth: Set(request.require_auth),
            created_at: Set(request.created_at),
        };
        // Concurrent duplicates land on the unique (module_id, endpoint)
        // index and DO NOTHING instead of a second row.
        let inserted = failed_requests::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    failed_requests::Column::ModuleId,
                    failed_requests::Column::Endpoint,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("queue failed request")?;
        Ok(inserted > 0)
    }

    async fn list_unresolved(&self) -> Result<Vec<FailedRequest>, TrackerError> {
        let models = failed_requests::Entity::find()
            .filter(failed_requests::Column::Status.ne(RequestStatus::Resolved.as_i16()))
            .order_by_asc(failed_requests::Column::Priority)
            .order_by_asc(failed_requests::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list unresolved failed requests")?;
        Ok(models.into_iter().map(failed_request_from_model).collect())
    }
}

fn failed_request_from_model(model: failed_requests::Model) -> FailedRequest {
    FailedRequest {
        id: model.id,
        module_id: model.module_id,
        endpoint: model.endpoint,
        payload: model.payload,
        priority: model.priority,
        retry_attempts: model.retry_attempts,
        status: RequestStatus::from_i16(model.status),
        error_message: model.error_message,
        verb: model.verb,
        require_auth: model.require_auth,
        created_at: model.created_at,
    }
}

// ── EULA config repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEulaConfigRepository {
    pub db: DatabaseConnection,
}

impl DbEulaConfigRepository {
    async fn find_config_row(&self) -> Result<Option<plugin_config::Model>, TrackerError> {
        let model = plugin_config::Entity::find()
            .filter(plugin_config::Column::ScopeId.eq(DEFAULT_MODULE_ID))
            .filter(plugin_config::Column::FieldName.eq(EULA_FIELD_NAME))
            .one(&self.db)
            .await
            .context("find eula version config")?;
        Ok(model)
    }
}

impl EulaConfigRepository for DbEulaConfigRepository {
    async fn version(&self) -> Result<Option<String>, TrackerError> {
        Ok(self.find_config_row().await?.map(|model| model.value))
    }

    async fn set_version(&self, version: &str) -> Result<(), TrackerError> {
        match self.find_config_row().await? {
            Some(row) => {
                let mut config = row.into_active_model();
                config.value = Set(version.to_owned());
                config
                    .update(&self.db)
                    .await
                    .context("update eula version config")?;
                Ok(())
            }
            None => {
                plugin_config::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    scope_id: Set(DEFAULT_MODULE_ID.to_owned()),
                    field_name: Set(EULA_FIELD_NAME.to_owned()),
                    value: Set(version.to_owned()),
                    hash: Set(format!("{DEFAULT_MODULE_ID}_{EULA_FIELD_NAME}")),
                }
                .insert(&self.db)
                .await
                .map_err(|e| {
                    TrackerError::ConfigInsertFailed(
                        anyhow::Error::new(e).context("insert eula version config"),
                    )
                })?;
                Ok(())
            }
        }
    }
}

// ── User marker repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserMarkerRepository {
    pub db: DatabaseConnection,
}

impl UserMarkerRepository for DbUserMarkerRepository {
    async fn exists(&self, user_id: &str) -> Result<bool, TrackerError> {
        use sea_orm::PaginatorTrait;
        let count = tracked_users::Entity::find()
            .filter(tracked_users::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .context("count user marker")?;
        Ok(count > 0)
    }

    async fn ensure(&self, user_id: &str) -> Result<bool, TrackerError> {
        let row = tracked_users::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user_id.to_owned()),
        };
        let inserted = tracked_users::Entity::insert(row)
            .on_conflict(
                OnConflict::column(tracked_users::Column::UserId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("ensure user marker")?;
        Ok(inserted > 0)
    }
}

// ── EULA acceptance repository ───────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEulaAcceptanceRepository {
    pub db: DatabaseConnection,
}

impl EulaAcceptanceRepository for DbEulaAcceptanceRepository {
    async fn has_accepted(&self, user_id: &str, version: &str) -> Result<bool, TrackerError> {
        use sea_orm::PaginatorTrait;
        let count = eula_acceptances::Entity::find()
            .filter(eula_acceptances::Column::UserId.eq(user_id))
            .filter(eula_acceptances::Column::Version.eq(version))
            .count(&self.db)
            .await
            .context("count eula acceptance")?;
        Ok(count > 0)
    }

    async fn insert_if_absent(&self, acceptance: &EulaAcceptance) -> Result<bool, TrackerError> {
        let row = eula_acceptances::ActiveModel {
            id: Set(acceptance.id),
            user_id: Set(acceptance.user_id.clone()),
            version: Set(acceptance.version.clone()),
            is_synced: Set(acceptance.is_synced),
            accepted_at: Set(acceptance.accepted_at),
        };
        let inserted = eula_acceptances::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    eula_acceptances::Column::UserId,
                    eula_acceptances::Column::Version,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("record eula acceptance")?;
        Ok(inserted > 0)
    }
}
