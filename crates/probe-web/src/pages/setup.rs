use leptos::prelude::*;
use probe_session::SetupGuide;

use crate::components::layout::{render_document, CardHeader, Shell};

#[component]
fn SetupPage(guide: SetupGuide) -> impl IntoView {
    let env_var = guide.env_var;
    let steps = guide
        .steps
        .into_iter()
        .map(|step| view! { <li>{step}</li> })
        .collect_view();

    view! {
        <Shell title="Gemini API Tester - setup" auto_refresh=false>
            <main class="card">
                <CardHeader title="Setup required" subtitle="No API key configured"/>
                <div class="card-body">
                    <p>"This tester needs a Gemini API key before it can send prompts."</p>
                    <ol class="setup-steps">{steps}</ol>
                    <p class="setup-note">
                        "The key is read once when the server starts from "
                        <code>{env_var}</code>
                        "."
                    </p>
                </div>
            </main>
        </Shell>
    }
}

pub fn render(guide: &SetupGuide) -> String {
    let guide = guide.clone();
    render_document(move || view! { <SetupPage guide=guide/> })
}
