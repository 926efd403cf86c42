use axum::routing::post;
use axum::Router;
use std::sync::Arc;

use crate::adapter::web::app_state::AppState;
use crate::adapter::web::route::users;

/// Builds the HTTP surface. Every `/users` request runs in its own unit of work.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users", post(users::post))
        .with_state(state)
}
