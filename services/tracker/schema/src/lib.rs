pub mod eula_acceptances;
pub mod failed_requests;
pub mod plugin_config;
pub mod tracked_users;
