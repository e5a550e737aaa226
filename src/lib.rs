pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use crate::services::{preference_service::PreferenceService, user_service::UserService};
use sqlx::PgPool;

/// Everything a caller (HTTP handler, CLI, batch job) needs to reach the
/// accounts store. Stateless apart from the pool; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub preference_service: PreferenceService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let user_service = UserService::new(pool.clone());
        let preference_service =
            PreferenceService::new(pool.clone(), config.preference_default_enabled);

        Self {
            pool,
            user_service,
            preference_service,
        }
    }
}
