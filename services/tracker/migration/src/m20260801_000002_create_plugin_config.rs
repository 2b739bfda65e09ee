use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PluginConfig::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PluginConfig::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PluginConfig::ScopeId).string().not_null())
                    .col(ColumnDef::new(PluginConfig::FieldName).string().not_null())
                    .col(ColumnDef::new(PluginConfig::Value).text().not_null())
                    .col(
                        ColumnDef::new(PluginConfig::Hash)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PluginConfig::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PluginConfig {
    Table,
    Id,
    ScopeId,
    FieldName,
    Value,
    Hash,
}
