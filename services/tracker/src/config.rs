/// Tracker configuration loaded from environment variables.
#[derive(Debug)]
pub struct TrackerConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
}

impl TrackerConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
        }
    }
}
