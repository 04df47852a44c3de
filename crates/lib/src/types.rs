use crate::providers::ai::AiProvider;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which path produced an answer.
///
/// The enum is the only in-process representation; it serializes to the
/// wire strings `"OpenAI"` and `"Mock"` at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerMode {
    #[serde(rename = "OpenAI")]
    OpenAi,
    Mock,
}

impl fmt::Display for AnswerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerMode::OpenAi => write!(f, "OpenAI"),
            AnswerMode::Mock => write!(f, "Mock"),
        }
    }
}

/// The outcome of resolving one question.
///
/// `error` is populated only when the provider path was attempted and
/// failed; the answer then comes from the mock fallback.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResult {
    pub answer: String,
    pub mode: AnswerMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-request inputs to [`AnswerClient::resolve`].
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub question: String,
    pub prompt_type: String,
    /// When set, the provider is skipped for this request only.
    pub force_provider_off: bool,
}

/// A client that turns a rendered prompt into an answer, either by calling
/// the configured AI provider or by producing a deterministic mock.
pub struct AnswerClient {
    pub(crate) ai_provider: Option<Box<dyn AiProvider>>,
}

impl fmt::Debug for AnswerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerClient")
            .field("provider_enabled", &self.ai_provider.is_some())
            .finish_non_exhaustive()
    }
}

/// A builder for creating `AnswerClient` instances.
#[derive(Default)]
pub struct AnswerClientBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
}

impl AnswerClientBuilder {
    /// Creates a new `AnswerClientBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AI provider. Leaving it unset builds a client that always
    /// answers in mock mode.
    pub fn ai_provider(mut self, provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    /// Builds the `AnswerClient`.
    pub fn build(self) -> AnswerClient {
        AnswerClient {
            ai_provider: self.ai_provider,
        }
    }
}
