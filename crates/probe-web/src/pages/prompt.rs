use leptos::prelude::*;
use probe_session::SessionState;

use crate::components::{
    chat_input::ChatInput,
    layout::{render_document, CardHeader, Shell},
    panels::ResultRegion,
};

#[component]
fn PromptPage(state: SessionState, model: String) -> impl IntoView {
    let auto_refresh = state.loading;

    view! {
        <Shell title="Gemini API Tester" auto_refresh=auto_refresh>
            <main class="card">
                <CardHeader title="Gemini API Tester" subtitle=format!("Deployment check ({model})")/>
                <div class="card-body">
                    <ChatInput state=state.clone()/>
                    <ResultRegion state=state/>
                </div>
            </main>
        </Shell>
    }
}

pub fn render(state: SessionState, model: &str) -> String {
    let model = model.to_string();
    render_document(move || view! { <PromptPage state=state model=model/> })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_shows_form_without_panels() {
        let html = render(SessionState::default(), "gemini-2.5-flash");
        assert!(html.contains(r#"action="/submit""#));
        assert!(html.contains("gemini-2.5-flash"));
        assert!(!html.contains("error-panel"));
        assert!(!html.contains("response-panel"));
        assert!(!html.contains("http-equiv"));
    }

    #[test]
    fn loading_session_auto_refreshes() {
        let state = SessionState {
            prompt: "p".into(),
            loading: true,
            ..Default::default()
        };
        let html = render(state, "gemini-2.5-flash");
        assert!(html.contains(r#"http-equiv="refresh""#));
        assert!(html.contains("Generating..."));
    }
}
