//! # KnowledgeBot Core
//!
//! This crate provides the building blocks for a small question-answering
//! backend: a prompt template store, a CSV-backed knowledge base, an AI
//! provider abstraction with a deterministic mock fallback, and an
//! append-only interaction log.

pub mod constants;
pub mod errors;
pub mod history;
pub mod knowledge;
pub mod prompts;
pub mod providers;
pub mod types;

pub use errors::{KnowledgeError, ProviderError, StorageError, TemplateError};
pub use types::{AnswerClient, AnswerClientBuilder, AnswerMode, AnswerResult, ResolveOptions};

use crate::prompts::PromptTemplate;
use tracing::{debug, info, warn};

impl AnswerClient {
    /// Resolves a question into an answer.
    ///
    /// The provider path is taken when a provider is configured and the
    /// request does not force it off. A provider failure is never
    /// propagated: the resolver falls back to the deterministic mock
    /// answer, reports `Mock` as the mode, and carries the provider's
    /// error text in `error`.
    pub async fn resolve(
        &self,
        template: &PromptTemplate,
        context: &str,
        options: &ResolveOptions,
    ) -> AnswerResult {
        let prompt = template.render(context, &options.question);
        debug!(template = %template.name, prompt_len = prompt.len(), "Built final prompt");

        let active_provider = self
            .ai_provider
            .as_ref()
            .filter(|_| !options.force_provider_off);

        if let Some(provider) = active_provider {
            match provider.generate(&prompt).await {
                Ok(answer) => {
                    return AnswerResult {
                        answer,
                        mode: AnswerMode::OpenAi,
                        error: None,
                    };
                }
                Err(e) => {
                    warn!(question = %options.question, error = %e, "Provider call failed, falling back to mock answer");
                    return AnswerResult {
                        answer: mock_answer(&options.prompt_type, &options.question),
                        mode: AnswerMode::Mock,
                        error: Some(e.to_string()),
                    };
                }
            }
        }

        if self.ai_provider.is_none() {
            info!(question = %options.question, "Provider not configured. Using mock answer.");
        } else {
            info!(question = %options.question, "Provider forced off for this request. Using mock answer.");
        }

        AnswerResult {
            answer: mock_answer(&options.prompt_type, &options.question),
            mode: AnswerMode::Mock,
            error: None,
        }
    }

    /// The mode the client operates in at startup, as reported by the
    /// status endpoint.
    pub fn mode(&self) -> AnswerMode {
        if self.ai_provider.is_some() {
            AnswerMode::OpenAi
        } else {
            AnswerMode::Mock
        }
    }
}

/// Produces the canned answer used whenever the provider is unavailable,
/// disabled, or failed.
///
/// The three formats are fixed; existing consumers match on them, so the
/// strings must not change.
pub fn mock_answer(prompt_type: &str, question: &str) -> String {
    match prompt_type {
        "concise" => format!("[Concise Mock] {question}? → Short answer."),
        "verbose" => format!(
            "[Verbose Mock] For your question: '{question}', here’s a longer simulated explanation with extra detail."
        ),
        _ => format!("[Mock Fallback] For your question: '{question}', here’s a simulated answer."),
    }
}
