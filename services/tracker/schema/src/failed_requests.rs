use sea_orm::entity::prelude::*;

/// One failed outbound request to the similarity service, queued for an
/// external retry worker. At most one row per `(module_id, endpoint)`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "failed_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub module_id: String,
    pub endpoint: String,
    pub payload: Json,
    pub priority: i32,
    pub retry_attempts: i32,
    pub status: i16,
    pub error_message: String,
    pub verb: String,
    pub require_auth: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
