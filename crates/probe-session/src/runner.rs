//! One request/response cycle per submit against a text-generation provider.
//!
//! The session state lives behind a `std::sync::Mutex` that is only held for
//! the bookkeeping on either side of the provider call, never across it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use probe_llm::{DynProvider, Request};
use probe_types::ProbeError;
use tokio::task::JoinHandle;

use crate::config::API_KEY_VAR;
use crate::state::{Invocation, SessionState};

/// Why a submit did not start an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    BlankPrompt,
    InFlight,
}

/// What a call to [`PromptRunner::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The attempt ran to completion and its outcome is now in the session state.
    Completed(Invocation),
    /// Nothing happened; the session state is unchanged.
    Ignored(IgnoreReason),
}

/// What a call to [`PromptRunner::spawn_submit`] did.
#[derive(Debug)]
pub enum Launch {
    /// `loading` is set and the provider call runs on this task.
    Spawned(JoinHandle<Invocation>),
    /// Settled without a provider call.
    Settled(Submission),
}

enum Admission {
    Started,
    Settled(Submission),
}

enum Backend {
    Provider(DynProvider),
    MissingCredential,
}

pub struct PromptRunner {
    backend: Backend,
    model: String,
    state: Mutex<SessionState>,
}

impl PromptRunner {
    pub fn new(provider: DynProvider, model: impl Into<String>) -> Self {
        Self {
            backend: Backend::Provider(provider),
            model: model.into(),
            state: Mutex::new(SessionState::default()),
        }
    }

    /// A runner whose every accepted submit reports the missing credential inline.
    pub fn without_credential(model: impl Into<String>) -> Self {
        Self {
            backend: Backend::MissingCredential,
            model: model.into(),
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_provider(&self) -> bool {
        matches!(self.backend, Backend::Provider(_))
    }

    /// A copy of the current session state.
    pub fn snapshot(&self) -> SessionState {
        self.lock().clone()
    }

    /// Runs one invocation for `prompt`.
    ///
    /// Blank prompts and submits made while another invocation is in flight
    /// are ignored without touching the state. Otherwise the previous
    /// response and error are cleared, `loading` is held for the duration of
    /// the provider call, and the outcome is stored. There is no retry.
    pub async fn submit(&self, prompt: &str) -> Submission {
        match self.admit(prompt) {
            Admission::Settled(submission) => submission,
            Admission::Started => Submission::Completed(self.invoke(prompt).await),
        }
    }

    /// Like [`PromptRunner::submit`], but the provider call runs on a spawned
    /// task. When this returns `Launch::Spawned`, `loading` is already set.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_submit(self: &Arc<Self>, prompt: &str) -> Launch {
        match self.admit(prompt) {
            Admission::Settled(submission) => Launch::Settled(submission),
            Admission::Started => {
                let runner = Arc::clone(self);
                let prompt = prompt.to_string();
                Launch::Spawned(tokio::spawn(async move { runner.invoke(&prompt).await }))
            }
        }
    }

    /// The synchronous half of a submit: filters, then either settles or
    /// marks the session as loading.
    fn admit(&self, prompt: &str) -> Admission {
        if prompt.trim().is_empty() {
            tracing::debug!("ignoring blank prompt");
            return Admission::Settled(Submission::Ignored(IgnoreReason::BlankPrompt));
        }

        let mut state = self.lock();
        if state.loading {
            tracing::debug!("ignoring submit while an invocation is in flight");
            return Admission::Settled(Submission::Ignored(IgnoreReason::InFlight));
        }
        if let Err(err) = self.provider() {
            tracing::warn!("submit rejected: {}", err);
            let outcome = Invocation::from_result(Err(err));
            state.prompt = prompt.to_string();
            state.finish(outcome.clone());
            return Admission::Settled(Submission::Completed(outcome));
        }
        state.begin(prompt);
        Admission::Started
    }

    /// The asynchronous half: the provider call and storing its outcome.
    /// Expects `admit` to have set `loading`.
    async fn invoke(&self, prompt: &str) -> Invocation {
        let guard = LoadingGuard {
            state: &self.state,
            armed: true,
        };

        let provider = match self.provider() {
            Ok(provider) => provider,
            Err(err) => {
                let outcome = Invocation::from_result(Err(err));
                guard.finish(outcome.clone());
                return outcome;
            }
        };

        let invocation_id = uuid::Uuid::new_v4();
        tracing::info!(%invocation_id, model = %self.model, provider = provider.name(), "invocation started");

        let request = Request::new(self.model.clone(), prompt);
        let result = provider.complete(&request).await;
        if let Err(err) = &result {
            tracing::error!(%invocation_id, error = %err, "invocation failed");
        }

        let outcome = Invocation::from_result(result);
        if let Invocation::Text(text) = &outcome {
            tracing::info!(%invocation_id, response_chars = text.chars().count(), "invocation completed");
        }
        guard.finish(outcome.clone());
        outcome
    }

    fn provider(&self) -> probe_types::Result<&DynProvider> {
        match &self.backend {
            Backend::Provider(provider) => Ok(provider),
            Backend::MissingCredential => Err(ProbeError::MissingCredential {
                var: API_KEY_VAR.to_string(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for PromptRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptRunner")
            .field("model", &self.model)
            .field("has_provider", &self.has_provider())
            .field("state", &self.snapshot())
            .finish()
    }
}

/// Clears `loading` if the invocation future is dropped before the call resolves.
struct LoadingGuard<'a> {
    state: &'a Mutex<SessionState>,
    armed: bool,
}

impl LoadingGuard<'_> {
    fn finish(mut self, outcome: Invocation) {
        self.armed = false;
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .finish(outcome);
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .loading = false;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
