use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EulaAcceptances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EulaAcceptances::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EulaAcceptances::UserId).string().not_null())
                    .col(ColumnDef::new(EulaAcceptances::Version).string().not_null())
                    .col(
                        ColumnDef::new(EulaAcceptances::IsSynced)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(EulaAcceptances::AcceptedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EulaAcceptances::Table, EulaAcceptances::UserId)
                            .to(TrackedUsers::Table, TrackedUsers::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A user accepts each version at most once.
        manager
            .create_index(
                Index::create()
                    .name("uq_eula_acceptances_user_version")
                    .table(EulaAcceptances::Table)
                    .col(EulaAcceptances::UserId)
                    .col(EulaAcceptances::Version)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EulaAcceptances::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum EulaAcceptances {
    Table,
    Id,
    UserId,
    Version,
    IsSynced,
    AcceptedAt,
}

#[derive(Iden)]
enum TrackedUsers {
    Table,
    UserId,
}
