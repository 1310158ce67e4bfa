//! Person CRUD routes under /api/persons.

use crate::handlers::person::{create, delete as delete_handler, list, list_paged, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn person_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/persons", get(list).post(create))
        .route("/api/persons/paged", get(list_paged))
        .route(
            "/api/persons/:id",
            get(read).put(update).delete(delete_handler),
        )
        .with_state(state)
}
