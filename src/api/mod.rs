pub mod admin;
pub mod answer;
pub mod auth;
pub mod extract;
pub mod question;
pub mod state;

pub use state::AppState;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer,
    timeout::TimeoutLayer,
};
use std::time::Duration;
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        // Health check
        .route("/api/health", get(health))

        // Account endpoints
        .route("/user/signup", post(auth::signup))
        .route("/user/signin", post(auth::signin))
        .route("/user/signout", post(auth::signout))
        .route("/userprofile/{user_id}", get(auth::profile))
        .route("/admin/user/{user_id}", delete(admin::delete_user))

        // Question endpoints
        .route("/question/create", post(question::create))
        .route("/question/all", get(question::list))
        .route("/question/all/{user_id}", get(question::list_by_user))
        .route("/question/edit/{question_id}", put(question::edit))
        .route("/question/delete/{question_id}", delete(question::delete))

        // Answer endpoints
        .route("/question/{question_id}/answer/create", post(answer::create))
        .route("/answer/edit/{answer_id}", put(answer::edit))
        .route("/answer/delete/{answer_id}", delete(answer::delete))
        .route("/answer/all/{question_id}", get(answer::list_by_question))

        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
