use leptos::prelude::*;
use probe_session::SessionState;

/// Keeps the send button in sync with the textarea while typing.
const SYNC_SEND: &str = r#"
const prompt = document.getElementById('prompt');
const send = document.getElementById('send');
prompt.addEventListener('input', function () {
    send.disabled = send.dataset.loading === 'true' || !prompt.value.trim();
});
"#;

/// The prompt form. The submit button starts disabled when the prompt is
/// blank or an invocation is outstanding.
#[component]
pub fn ChatInput(state: SessionState) -> impl IntoView {
    let disabled = !state.can_submit();
    let label = if state.loading { "Generating..." } else { "Send" };

    view! {
        <form method="post" action="/submit" class="chat-input-container">
            <label>
                <span>"Your prompt"</span>
                <textarea
                    id="prompt"
                    name="prompt"
                    class="chat-input"
                    placeholder="Example: write me a short poem..."
                >
                    {state.prompt}
                </textarea>
            </label>
            <button
                id="send"
                type="submit"
                class="submit-button"
                data-loading=state.loading.to_string()
                disabled=disabled
            >
                {label}
            </button>
        </form>
        <script inner_html=SYNC_SEND></script>
    }
}
