pub mod prompt;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use probe_session::View;

/// Shared application state accessible from Axum routes.
#[derive(Clone, Debug)]
pub struct AppState {
    pub view: View,
}

impl AppState {
    pub fn new(view: View) -> Self {
        Self { view }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(prompt::index))
        .route("/submit", post(prompt::submit))
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html("<h1>Not found</h1>"))
}
