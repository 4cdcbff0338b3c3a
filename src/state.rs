use std::sync::Arc;

use crate::auth::{AuthError, TokenService};
use crate::config::AppConfig;
use crate::database::Database;

/// Handles shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database) -> Result<Self, AuthError> {
        let tokens = TokenService::from_config(&config.security)?;
        Ok(Self {
            config: Arc::new(config),
            db,
            tokens,
        })
    }
}
