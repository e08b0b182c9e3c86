use configs::{AppConfig, ErrorStatusMode};
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

/// Shared by every handler; cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: ServerAuthConfig,
    pub error_status: ErrorStatusMode,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &AppConfig) -> Self {
        Self {
            db,
            auth: ServerAuthConfig {
                jwt_secret: cfg.auth.jwt_secret.clone(),
                token_ttl_hours: cfg.auth.token_ttl_hours,
            },
            error_status: cfg.api.error_status,
        }
    }
}
