use sea_orm::entity::prelude::*;

/// One accepted EULA version for one host user. A user accumulates one row
/// per version accepted over time; `(user_id, version)` is unique.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "eula_acceptances")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: String,
    pub version: String,
    pub is_synced: bool,
    pub accepted_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tracked_users::Entity",
        from = "Column::UserId",
        to = "super::tracked_users::Column::UserId"
    )]
    TrackedUser,
}

impl Related<super::tracked_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrackedUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
