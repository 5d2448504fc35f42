//! Shared error types for the prompt tester crates.
//!
//! - `ProbeError` — unified error taxonomy (configuration, invocation, generic)
//! - `Result` — convenience alias

/// Unified error type for all prompt tester subsystems.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    // === Provider Errors ===
    #[error("Provider {provider} returned HTTP {status}: {message}")]
    ProviderError {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Rate limited by {provider}: {message}")]
    RateLimited { provider: String, message: String },

    #[error("Authentication failed for provider {provider}: {message}")]
    AuthError { provider: String, message: String },

    #[error("Could not reach {provider}: {message}")]
    Transport { provider: String, message: String },

    // === Configuration Errors ===
    #[error("API key not found. Add {var} to your deployment's environment variables.")]
    MissingCredential { var: String },

    // === Generic ===
    #[error("{0}")]
    Other(String),
}

impl ProbeError {
    /// The human-readable message to show a user, without the provider/status
    /// framing of the `Display` impl. May be empty.
    pub fn display_message(&self) -> String {
        match self {
            ProbeError::ProviderError { message, .. }
            | ProbeError::RateLimited { message, .. }
            | ProbeError::AuthError { message, .. }
            | ProbeError::Transport { message, .. } => message.clone(),
            ProbeError::Other(message) => message.clone(),
            ProbeError::MissingCredential { .. } => self.to_string(),
        }
    }
}

/// A convenience alias for `Result<T, ProbeError>`.
pub type Result<T> = std::result::Result<T, ProbeError>;
