use leptos::prelude::*;
use leptos::tachys::view::RenderHtml;

const STYLE: &str = r#"
body { margin: 0; min-height: 100vh; display: flex; flex-direction: column; align-items: center; justify-content: center; background: #f9fafb; font-family: system-ui, sans-serif; padding: 1rem; box-sizing: border-box; }
.card { max-width: 36rem; width: 100%; background: #fff; border: 1px solid #f3f4f6; border-radius: 1rem; box-shadow: 0 10px 25px rgba(0,0,0,.08); overflow: hidden; }
.card-header { background: #2563eb; color: #fff; padding: 1.5rem; }
.card-header h1 { margin: 0; font-size: 1.25rem; }
.card-header p { margin: .25rem 0 0; font-size: .75rem; color: #dbeafe; }
.card-body { padding: 1.5rem; display: flex; flex-direction: column; gap: 1.5rem; }
.chat-input-container, .chat-input-container label { display: flex; flex-direction: column; gap: .5rem; }
.chat-input { width: 100%; box-sizing: border-box; height: 8rem; padding: 1rem; border: 1px solid #e5e7eb; border-radius: .75rem; resize: none; font: inherit; }
.submit-button { background: #2563eb; color: #fff; border: 0; border-radius: .75rem; padding: .75rem 1rem; font-weight: 500; cursor: pointer; }
.submit-button:disabled { background: #93c5fd; cursor: not-allowed; }
.error-panel { background: #fef2f2; border: 1px solid #fee2e2; color: #b91c1c; padding: 1rem; border-radius: .75rem; font-size: .875rem; }
.response-panel { background: #f8fafc; border: 1px solid #e2e8f0; padding: 1.25rem; border-radius: .75rem; }
.response-panel h3 { margin: 0 0 .75rem; font-size: .75rem; text-transform: uppercase; letter-spacing: .05em; color: #94a3b8; }
.response-text { white-space: pre-wrap; line-height: 1.6; color: #1e293b; }
.setup-steps li { margin-bottom: .5rem; }
.setup-steps code, .setup-note code { background: #f1f5f9; padding: 0 .25rem; border-radius: .25rem; }
.footer { margin-top: 1.5rem; font-size: .75rem; color: #9ca3af; text-align: center; }
"#;

/// Renders a full page to an HTML string. Components run under a fresh
/// reactive owner that is dropped with the request.
pub fn render_document<V: IntoView + 'static>(page: impl FnOnce() -> V) -> String {
    let owner = Owner::new();
    let html = owner.with(|| page().to_html());
    format!("<!DOCTYPE html>{html}")
}

/// The document shell. `auto_refresh` reloads the page every two seconds,
/// used while an invocation is outstanding.
#[component]
pub fn Shell(title: &'static str, auto_refresh: bool, children: Children) -> impl IntoView {
    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                {auto_refresh.then(|| view! { <meta http-equiv="refresh" content="2"/> })}
                <title>{title}</title>
                <style inner_html=STYLE></style>
            </head>
            <body>
                {children()}
                <p class="footer">"Powered by the Gemini API"</p>
            </body>
        </html>
    }
}

/// The coloured card header shared by both pages.
#[component]
pub fn CardHeader(title: &'static str, #[prop(into)] subtitle: String) -> impl IntoView {
    view! {
        <header class="card-header">
            <h1>{title}</h1>
            <p>{subtitle}</p>
        </header>
    }
}
