pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/api/questions", get(handlers::handle_list_questions))
        // Interview API
        .route("/api/interview/start", post(handlers::handle_start))
        .route(
            "/api/interview/:id",
            get(handlers::handle_get_session).delete(handlers::handle_end),
        )
        .route("/api/interview/:id/validate", get(handlers::handle_validate))
        .route("/api/interview/:id/message", post(handlers::handle_message))
        .route("/api/interview/:id/advance", post(handlers::handle_advance))
        .route(
            "/api/interview/:id/sections/:section",
            post(handlers::handle_submit_section),
        )
        .route(
            "/api/interview/:id/sections/:section/hint",
            post(handlers::handle_hint),
        )
        .with_state(state)
}
