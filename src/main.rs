use std::env;

use dotenvy::dotenv;
use taskhub::logging::init_tracing;
use taskhub::router::init_router;
use taskhub::state::init_app_state;
use tracing::{error, info};

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let state = match init_app_state().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to initialize application state");
            return Err(e);
        }
    };

    taskhub_db::run_migrations(&state.db).await?;
    info!("Database migrations applied");

    let app = init_router(state);

    let addr = env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(server.addr = %addr, "Server running");
    info!("OpenAPI document available at /api-docs/openapi.json");

    axum::serve(listener, app).await?;
    Ok(())
}
