//! Session layer for the prompt tester.
//!
//! - `Settings` — configuration read once at startup
//! - `SessionState` — prompt/response/loading/error for one session
//! - `PromptRunner` — runs one request/response cycle per submit
//! - `View` — setup guide or interactive form, chosen before any state exists

mod config;
mod runner;
mod state;
mod view;

pub use config::{Credential, CredentialGate, Settings, API_KEY_VAR, BASE_URL_VAR};
pub use runner::{IgnoreReason, Launch, PromptRunner, Submission};
pub use state::{Invocation, SessionState, EMPTY_REPLY_PLACEHOLDER, GENERIC_ERROR_MESSAGE};
pub use view::{SetupGuide, View};
