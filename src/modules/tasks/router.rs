use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_task, delete_task, get_task, get_tasks, update_task};

pub fn init_tasks_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_task).get(get_tasks))
        .route("/{id}", get(get_task).put(update_task).delete(delete_task))
}
