//! The page route and the form submission route.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use probe_session::{Launch, Submission, View};
use serde::Deserialize;

use super::AppState;
use crate::pages;

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub prompt: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    match &state.view {
        View::Setup(guide) => Html(pages::setup::render(guide)),
        View::Configured(runner) => Html(pages::prompt::render(runner.snapshot(), runner.model())),
    }
}

/// Starts an invocation and redirects straight back to the page, which
/// shows the loading state until the spawned call settles.
pub async fn submit(State(state): State<AppState>, Form(form): Form<SubmitForm>) -> Response {
    let runner = match &state.view {
        View::Setup(guide) => {
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Html(pages::setup::render(guide)),
            )
                .into_response();
        }
        View::Configured(runner) => runner,
    };

    match runner.spawn_submit(&form.prompt) {
        // Detached: the invocation outlives this request and records its own outcome.
        Launch::Spawned(_) => {}
        Launch::Settled(Submission::Ignored(reason)) => {
            tracing::debug!(?reason, "submit ignored")
        }
        Launch::Settled(Submission::Completed(_)) => {}
    }

    Redirect::to("/").into_response()
}
