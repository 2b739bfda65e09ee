use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FailedRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FailedRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FailedRequests::ModuleId).string().not_null())
                    .col(ColumnDef::new(FailedRequests::Endpoint).string().not_null())
                    .col(ColumnDef::new(FailedRequests::Payload).json_binary().not_null())
                    .col(ColumnDef::new(FailedRequests::Priority).integer().not_null())
                    .col(
                        ColumnDef::new(FailedRequests::RetryAttempts)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(FailedRequests::Status).small_integer().not_null())
                    .col(ColumnDef::new(FailedRequests::ErrorMessage).text().not_null())
                    .col(ColumnDef::new(FailedRequests::Verb).string().not_null())
                    .col(ColumnDef::new(FailedRequests::RequireAuth).boolean().not_null())
                    .col(
                        ColumnDef::new(FailedRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One queued row per (module, endpoint); inserts rely on this for
        // conflict-tolerant idempotency.
        manager
            .create_index(
                Index::create()
                    .name("uq_failed_requests_module_endpoint")
                    .table(FailedRequests::Table)
                    .col(FailedRequests::ModuleId)
                    .col(FailedRequests::Endpoint)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FailedRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum FailedRequests {
    Table,
    Id,
    ModuleId,
    Endpoint,
    Payload,
    Priority,
    RetryAttempts,
    Status,
    ErrorMessage,
    Verb,
    RequireAuth,
    CreatedAt,
}
