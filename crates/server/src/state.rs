//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the
//! logic for building it at startup. The `AppState` holds all shared
//! resources: the configuration, the prompt store, the knowledge base,
//! the answer client, and the interaction log store.

use crate::config::AppConfig;
use knowledgebot::{
    history::LogStore, knowledge::KnowledgeBase, prompts::PromptStore,
    providers::ai::openai::OpenAiProvider, AnswerClient, AnswerClientBuilder,
};
use std::sync::Arc;
use tracing::{info, warn};

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// Loads prompt templates by type, re-reading the file per request.
    pub prompt_store: Arc<PromptStore>,
    /// The CSV-backed knowledge base, loaded once at startup.
    pub knowledge: Arc<KnowledgeBase>,
    /// Resolves questions via the provider or the mock fallback.
    pub answer_client: Arc<AnswerClient>,
    /// The append-only interaction log.
    pub log_store: Arc<LogStore>,
}

/// Builds the shared application state from the configuration.
///
/// Fails fast: an unopenable database, a missing CSV file, or an absent
/// title column all abort startup.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let log_store = LogStore::new(&config.db_url).await?;
    log_store.init_schema().await?;
    info!(db_path = %config.db_url, "Initialized interaction log store.");

    let knowledge = KnowledgeBase::load(&config.csv_path, &config.csv_title_column)?;

    let mut builder = AnswerClientBuilder::new();
    match config
        .provider
        .api_key
        .clone()
        .filter(|key| !key.is_empty())
    {
        Some(api_key) => {
            let provider = OpenAiProvider::new(
                config.provider.api_url.clone(),
                api_key,
                config.provider.model_name.clone(),
            )?;
            builder = builder.ai_provider(Box::new(provider));
            info!(model = %config.provider.model_name, "OpenAI mode enabled. Real API calls will be made.");
        }
        None => {
            warn!("No API key configured. Mock mode enabled, answers will be simulated.");
        }
    }
    let answer_client = builder.build();

    let prompt_store = PromptStore::new(&config.prompts_dir);

    Ok(AppState {
        config: Arc::new(config),
        prompt_store: Arc::new(prompt_store),
        knowledge: Arc::new(knowledge),
        answer_client: Arc::new(answer_client),
        log_store: Arc::new(log_store),
    })
}
