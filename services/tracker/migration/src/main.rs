use sea_orm_migration::MigratorTrait;
use sea_orm_migration::sea_orm::Database;
use tracing::info;

use simcheck_tracker_migration::Migrator;

#[tokio::main]
async fn main() {
    simcheck_core::tracing::init_tracing();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
    let db = Database::connect(&database_url)
        .await
        .expect("failed to connect to database");

    Migrator::up(&db, None).await.expect("migration failed");
    info!("migrations applied");
}
