use std::sync::Arc;

use probe_llm::{DynProvider, GeminiAdapter};

use crate::config::{CredentialGate, Settings, API_KEY_VAR};
use crate::runner::PromptRunner;

/// Instructions shown in place of the form when no credential is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupGuide {
    pub env_var: &'static str,
    pub steps: Vec<String>,
}

impl Default for SetupGuide {
    fn default() -> Self {
        Self {
            env_var: API_KEY_VAR,
            steps: vec![
                "Create a Gemini API key in Google AI Studio.".to_string(),
                format!(
                    "Add it to your deployment's environment variables under the name {API_KEY_VAR}."
                ),
                "Redeploy or restart the server so the new variable is picked up.".to_string(),
            ],
        }
    }
}

/// Top-level view for a session.
#[derive(Debug, Clone)]
pub enum View {
    Setup(SetupGuide),
    Configured(Arc<PromptRunner>),
}

impl View {
    /// Chooses the view once, from settings read at startup.
    pub fn select(settings: &Settings) -> Self {
        Self::select_with(settings, |settings, credential| {
            let mut adapter = GeminiAdapter::new(credential.to_string())
                .with_default_model(settings.model.clone());
            if let Some(url) = &settings.base_url {
                adapter = adapter.with_base_url(url.clone());
            }
            DynProvider::new(adapter)
        })
    }

    /// Like [`View::select`] but with a caller-supplied provider factory.
    pub fn select_with(
        settings: &Settings,
        make_provider: impl FnOnce(&Settings, &str) -> DynProvider,
    ) -> Self {
        match (&settings.credential, settings.gate) {
            (Some(credential), _) => {
                let provider = make_provider(settings, credential.expose());
                tracing::info!(provider = provider.name(), model = %settings.model, "credential found, serving prompt form");
                View::Configured(Arc::new(PromptRunner::new(provider, settings.model.clone())))
            }
            (None, CredentialGate::SetupGuide) => {
                tracing::warn!("{} is not set, serving setup guide", API_KEY_VAR);
                View::Setup(SetupGuide::default())
            }
            (None, CredentialGate::Inline) => {
                tracing::warn!("{} is not set, submits will report it inline", API_KEY_VAR);
                View::Configured(Arc::new(PromptRunner::without_credential(
                    settings.model.clone(),
                )))
            }
        }
    }

    pub fn runner(&self) -> Option<&Arc<PromptRunner>> {
        match self {
            View::Configured(runner) => Some(runner),
            View::Setup(_) => None,
        }
    }
}
