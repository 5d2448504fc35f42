use leptos::prelude::*;
use probe_session::SessionState;

/// The result region: the error panel, the response panel, or nothing.
/// An error takes precedence so at most one panel is ever shown.
#[component]
pub fn ResultRegion(state: SessionState) -> impl IntoView {
    if state.loading {
        None
    } else if !state.error.is_empty() {
        Some(view! { <ErrorPanel message=state.error/> }.into_any())
    } else if !state.response.is_empty() {
        Some(view! { <ResponsePanel text=state.response/> }.into_any())
    } else {
        None
    }
}

#[component]
fn ErrorPanel(message: String) -> impl IntoView {
    view! {
        <div class="error-panel" role="alert">
            <p>{message}</p>
        </div>
    }
}

#[component]
fn ResponsePanel(text: String) -> impl IntoView {
    view! {
        <div class="response-panel">
            <h3>"AI response"</h3>
            <div class="response-text">{text}</div>
        </div>
    }
}
