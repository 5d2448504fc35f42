//! Text-generation client used by the prompt tester.
//!
//! Provides the `ProviderAdapter` trait, the `DynProvider` wrapper, and the
//! `GeminiAdapter` that talks to the `generateContent` endpoint.

mod gemini;
mod provider;
mod types;

pub use gemini::{GeminiAdapter, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use provider::*;
pub use types::*;
