use sqlx::PgPool;
use tracing::info;

use taskhub_auth::Authorizer;
use taskhub_config::{AuthConfig, CorsConfig};
use taskhub_db::init_db_pool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub authorizer: Authorizer,
    pub auth_config: AuthConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Builds the state from already loaded configuration. The verifier is
    /// selected here, once, for the lifetime of the process.
    pub fn new(
        db: PgPool,
        auth_config: AuthConfig,
        cors_config: CorsConfig,
    ) -> anyhow::Result<Self> {
        let authorizer = Authorizer::from_config(&auth_config)?;

        Ok(Self {
            db,
            authorizer,
            auth_config,
            cors_config,
        })
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let auth_config = AuthConfig::from_env();
    let cors_config = CorsConfig::from_env();
    let db = init_db_pool().await;

    let state = AppState::new(db, auth_config, cors_config)?;
    info!(
        verifier = state.authorizer.verifier_name(),
        cors.origins = state.cors_config.allowed_origins.len(),
        "Application state initialized"
    );
    Ok(state)
}
