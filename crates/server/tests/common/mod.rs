//! # Common Test Utilities
//!
//! Centralizes the test harness used across the `knowledgebot-server`
//! integration tests: a full application harness that spawns a real
//! server on a random port, with the AI provider pointed at an
//! `httpmock::MockServer` and all file resources in a temporary
//! directory.

#![allow(unused)]

use anyhow::Result;
use httpmock::MockServer;
use knowledgebot::{
    history::LogStore, knowledge::KnowledgeBase, prompts::PromptStore,
    providers::ai::openai::OpenAiProvider, AnswerClientBuilder,
};
use knowledgebot_server::{config::AppConfig, router::create_router, state::AppState};
use reqwest::Client;
use std::{fs, net::SocketAddr, sync::Arc};
use tempfile::TempDir;
use tokio::{net::TcpListener, task::JoinHandle};

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    /// Shares the in-memory database with the running server, so tests
    /// can observe what the handlers logged.
    pub log_store: Arc<LogStore>,
    _resource_dir: TempDir,
    _server_handle: JoinHandle<()>,
}

impl TestApp {
    /// Spawns the application with a provider configured against the
    /// mock server.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_inner(true).await
    }

    /// Spawns the application with no provider, i.e. process-wide mock
    /// mode.
    pub async fn spawn_without_provider() -> Result<Self> {
        Self::spawn_inner(false).await
    }

    async fn spawn_inner(with_provider: bool) -> Result<Self> {
        // `try_init` is used to prevent panic if the logger is already
        // initialized by another test.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();
        let resource_dir = TempDir::new()?;

        // Prompt templates.
        let prompts_dir = resource_dir.path().join("prompts");
        fs::create_dir(&prompts_dir)?;
        fs::write(
            prompts_dir.join("concise.yaml"),
            "template: \"Context:\\n{context}\\n\\nAnswer concisely: {question}\"\n",
        )?;
        fs::write(
            prompts_dir.join("verbose.yaml"),
            "template: \"Context:\\n{context}\\n\\nAnswer at length: {question}\"\n",
        )?;

        // Knowledge CSV.
        let csv_path = resource_dir.path().join("movies.csv");
        fs::write(
            &csv_path,
            "id,title\n1,The Shawshank Redemption\n2,The Godfather\n3,The Dark Knight\n",
        )?;

        let log_store = Arc::new(LogStore::new(":memory:").await?);
        log_store.init_schema().await?;

        let knowledge = Arc::new(KnowledgeBase::load(&csv_path, "title")?);

        let mut builder = AnswerClientBuilder::new();
        if with_provider {
            let provider = OpenAiProvider::new(
                mock_server.url("/v1/chat/completions"),
                "test-key".to_string(),
                "gpt-3.5-turbo".to_string(),
            )?;
            builder = builder.ai_provider(Box::new(provider));
        }

        let config = AppConfig {
            db_url: ":memory:".to_string(),
            csv_path: csv_path.display().to_string(),
            prompts_dir: prompts_dir.display().to_string(),
            ..AppConfig::default()
        };

        let app_state = AppState {
            config: Arc::new(config),
            prompt_store: Arc::new(PromptStore::new(&prompts_dir)),
            knowledge,
            answer_client: Arc::new(builder.build()),
            log_store: log_store.clone(),
        };

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let server_handle = tokio::spawn(async move {
            let app = create_router(app_state);
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Server error: {e}");
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            log_store,
            _resource_dir: resource_dir,
            _server_handle: server_handle,
        })
    }
}
