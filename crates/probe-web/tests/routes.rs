//! End-to-end tests of the page and submit routes with a mock provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, http::Request as HttpRequest, http::StatusCode, Router};
use http_body_util::BodyExt;
use probe_llm::{DynProvider, FinishReason, ProviderAdapter, Request, Response, Usage};
use probe_session::{CredentialGate, PromptRunner, Settings, View, API_KEY_VAR};
use probe_types::ProbeError;
use probe_web::{build_app, AppState};
use tokio::sync::Notify;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct ScriptedProvider {
    calls: Arc<AtomicUsize>,
    gate: Option<Arc<Notify>>,
}

#[async_trait]
impl ProviderAdapter for ScriptedProvider {
    async fn complete(&self, request: &Request) -> Result<Response, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let text = match request.contents.as_str() {
            "fail" => return Err(ProbeError::Other("quota exceeded".into())),
            "nothing" => None,
            "markup" => Some("<b>bold</b> & more".to_string()),
            other => Some(format!("Hello, {other}")),
        };
        Ok(Response {
            id: "scripted".into(),
            text,
            usage: Usage::default(),
            model: request.model.clone(),
            finish_reason: FinishReason::EndTurn,
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }
}

fn settings(key: Option<&str>, gate: CredentialGate) -> Settings {
    let key = key.map(String::from);
    Settings::from_lookup(move |name| if name == API_KEY_VAR { key.clone() } else { None })
        .with_gate(gate)
}

struct TestApp {
    router: Router,
    runner: Arc<PromptRunner>,
    calls: Arc<AtomicUsize>,
}

impl TestApp {
    fn new(gate: Option<Arc<Notify>>) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let view = View::select_with(&settings(Some("test-key"), CredentialGate::SetupGuide), {
            let calls = calls.clone();
            move |_, _| DynProvider::new(ScriptedProvider { calls, gate })
        });
        let runner = view.runner().cloned().expect("configured view");
        Self {
            router: build_app(AppState::new(view)),
            runner,
            calls,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Posts a prompt, then waits for the detached invocation to settle.
    async fn submit(&self, form_body: &str) {
        post_prompt(&self.router, form_body).await;
        wait_until_idle(&self.runner).await;
    }
}

async fn wait_until_idle(runner: &PromptRunner) {
    while runner.snapshot().loading {
        tokio::task::yield_now().await;
    }
}

fn send_button(html: &str) -> &str {
    let start = html.find(r#"id="send""#).expect("send button");
    let end = start + html[start..].find("</button>").expect("closed button");
    &html[start..end]
}

fn page_request() -> HttpRequest<Body> {
    HttpRequest::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap()
}

fn submit_request(form_body: &str) -> HttpRequest<Body> {
    HttpRequest::builder()
        .method("POST")
        .uri("/submit")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form_body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get_page(app: &Router) -> String {
    let response = app.clone().oneshot(page_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_text(response).await
}

async fn post_prompt(app: &Router, form_body: &str) {
    let response = app.clone().oneshot(submit_request(form_body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");
}

// ---------------------------------------------------------------------------
// Setup view
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_key_serves_setup_guide_only() {
    let app = build_app(AppState::new(View::select(&settings(
        None,
        CredentialGate::SetupGuide,
    ))));

    let html = get_page(&app).await;
    assert!(html.contains("Setup required"));
    assert!(html.contains("<code>API_KEY</code>"));
    assert!(!html.contains("<form"));

    let response = app.clone().oneshot(submit_request("prompt=hello")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(body_text(response).await.contains("Setup required"));
}

// ---------------------------------------------------------------------------
// Form view
// ---------------------------------------------------------------------------

#[tokio::test]
async fn configured_app_serves_form_not_setup() {
    let app = TestApp::new(None);

    let html = get_page(&app.router).await;
    assert!(html.contains("Gemini API Tester"));
    assert!(html.contains(r#"action="/submit""#));
    assert!(!html.contains("Setup required"));
    let button = send_button(&html);
    assert!(button.contains("disabled"));
    assert!(button.ends_with(">Send"));
    assert_eq!(app.calls(), 0);
}

#[tokio::test]
async fn successful_submit_shows_response() {
    let app = TestApp::new(None);

    app.submit("prompt=world").await;

    let html = get_page(&app.router).await;
    assert!(html.contains("response-panel"));
    assert!(html.contains("Hello, world"));
    assert!(!html.contains("error-panel"));
    assert!(html.contains(">world</textarea>"));
    assert!(!send_button(&html).contains("disabled"));
    assert_eq!(app.calls(), 1);
}

#[tokio::test]
async fn submit_redirects_while_call_is_pending() {
    let gate = Arc::new(Notify::new());
    let app = TestApp::new(Some(gate.clone()));

    post_prompt(&app.router, "prompt=world").await;
    assert!(app.runner.snapshot().loading);

    let html = get_page(&app.router).await;
    let button = send_button(&html);
    assert!(button.contains("disabled"));
    assert!(button.ends_with(">Generating..."));
    assert!(html.contains(r#"http-equiv="refresh""#));
    assert!(!html.contains("response-panel"));

    // A second submit during the call is accepted by the route but ignored.
    post_prompt(&app.router, "prompt=again").await;

    gate.notify_one();
    wait_until_idle(&app.runner).await;

    let html = get_page(&app.router).await;
    assert!(html.contains("Hello, world"));
    assert!(!html.contains("Hello, again"));
    assert!(!html.contains("http-equiv"));
    assert_eq!(app.calls(), 1);
}

#[tokio::test]
async fn failed_submit_shows_error_message() {
    let app = TestApp::new(None);

    app.submit("prompt=fail").await;

    let html = get_page(&app.router).await;
    assert!(html.contains("error-panel"));
    assert!(html.contains("quota exceeded"));
    assert!(!html.contains("response-panel"));
}

#[tokio::test]
async fn empty_reply_shows_placeholder() {
    let app = TestApp::new(None);

    app.submit("prompt=nothing").await;

    let html = get_page(&app.router).await;
    assert!(html.contains("The response text came back empty."));
}

#[tokio::test]
async fn response_text_is_escaped() {
    let app = TestApp::new(None);

    app.submit("prompt=markup").await;

    let html = get_page(&app.router).await;
    assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; more"));
    assert!(!html.contains("<b>bold</b>"));
}

#[tokio::test]
async fn blank_submit_makes_no_call() {
    let app = TestApp::new(None);

    app.submit("prompt=+++").await;
    app.submit("").await;

    let html = get_page(&app.router).await;
    assert!(!html.contains("response-panel"));
    assert!(!html.contains("error-panel"));
    assert_eq!(app.calls(), 0);
}

#[tokio::test]
async fn later_submit_replaces_earlier_error() {
    let app = TestApp::new(None);

    app.submit("prompt=fail").await;
    app.submit("prompt=again").await;

    let html = get_page(&app.router).await;
    assert!(html.contains("Hello, again"));
    assert!(!html.contains("quota exceeded"));
    assert_eq!(app.calls(), 2);
}

#[tokio::test]
async fn inline_gate_reports_missing_key_on_submit() {
    let app = build_app(AppState::new(View::select(&settings(
        None,
        CredentialGate::Inline,
    ))));

    let html = get_page(&app).await;
    assert!(html.contains(r#"action="/submit""#));

    post_prompt(&app, "prompt=hello").await;

    let html = get_page(&app).await;
    assert!(html.contains("error-panel"));
    assert!(html.contains("API key not found"));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = TestApp::new(None);

    let response = app
        .router
        .oneshot(
            HttpRequest::builder()
                .method("GET")
                .uri("/api/state")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
