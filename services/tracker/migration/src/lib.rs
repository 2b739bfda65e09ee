use sea_orm_migration::prelude::*;

mod m20260801_000001_create_failed_requests;
mod m20260801_000002_create_plugin_config;
mod m20260801_000003_create_tracked_users;
mod m20260801_000004_create_eula_acceptances;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_failed_requests::Migration),
            Box::new(m20260801_000002_create_plugin_config::Migration),
            Box::new(m20260801_000003_create_tracked_users::Migration),
            Box::new(m20260801_000004_create_eula_acceptances::Migration),
        ]
    }
}
