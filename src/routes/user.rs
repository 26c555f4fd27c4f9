//! User CRUD routes.

use crate::handlers::user::{create, delete as delete_handler, read, update};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn user_routes(state: AppState) -> Router {
    Router::new()
        .route("/user", post(create))
        .route("/user/:id", get(read).patch(update).delete(delete_handler))
        .with_state(state)
}
