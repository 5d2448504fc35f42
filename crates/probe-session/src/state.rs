use probe_llm::Response;
use probe_types::ProbeError;

/// Shown as the response when a call succeeds but returns no text.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "The response text came back empty.";

/// Shown as the error when a failure carries no message.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred.";

/// UI state for one session. Empty `response`/`error` mean "nothing to show".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub prompt: String,
    pub response: String,
    pub loading: bool,
    pub error: String,
}

impl SessionState {
    /// Whether the submit control should accept input.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.prompt.trim().is_empty()
    }

    pub(crate) fn begin(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
        self.error.clear();
        self.response.clear();
        self.loading = true;
    }

    pub(crate) fn finish(&mut self, outcome: Invocation) {
        match outcome {
            Invocation::Text(text) => {
                self.response = text;
                self.error.clear();
            }
            Invocation::Failure(message) => {
                self.error = message;
                self.response.clear();
            }
        }
        self.loading = false;
    }
}

/// Outcome of one invocation, normalized for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Text(String),
    Failure(String),
}

impl Invocation {
    pub fn from_result(result: Result<Response, ProbeError>) -> Self {
        match result {
            Ok(response) => Invocation::Text(
                response
                    .text()
                    .map(String::from)
                    .unwrap_or_else(|| EMPTY_REPLY_PLACEHOLDER.to_string()),
            ),
            Err(err) => Invocation::failure(err.display_message()),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            Invocation::Failure(GENERIC_ERROR_MESSAGE.to_string())
        } else {
            Invocation::Failure(message)
        }
    }
}
