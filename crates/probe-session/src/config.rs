use std::fmt;

use probe_llm::DEFAULT_MODEL;

pub const API_KEY_VAR: &str = "API_KEY";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";

/// The secret used to authorize generation calls. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for empty or whitespace-only values. Any other value is
    /// kept exactly as given, surrounding whitespace included.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// How a missing credential is surfaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CredentialGate {
    /// Full-page setup instructions; the form is unreachable.
    #[default]
    SetupGuide,
    /// The form is shown and each submit reports the missing credential inline.
    Inline,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub credential: Option<Credential>,
    pub gate: CredentialGate,
    pub model: String,
    pub base_url: Option<String>,
}

impl Settings {
    /// Reads the credential and endpoint override from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let credential = lookup(API_KEY_VAR).and_then(Credential::new);
        let base_url = lookup(BASE_URL_VAR).filter(|url| !url.trim().is_empty());

        tracing::debug!(
            credential_present = credential.is_some(),
            base_url_override = base_url.is_some(),
            "loaded settings"
        );

        Self {
            credential,
            gate: CredentialGate::default(),
            model: DEFAULT_MODEL.to_string(),
            base_url,
        }
    }

    pub fn with_gate(mut self, gate: CredentialGate) -> Self {
        self.gate = gate;
        self
    }
}
