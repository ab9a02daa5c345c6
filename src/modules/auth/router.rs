use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_me, issue_access_token};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/token", post(issue_access_token))
        .route("/me", get(get_me))
}
