//! # Route Handlers
//!
//! This module contains the Axum handlers for the `knowledgebot-server`:
//! the status and health endpoints, and the `/ask` endpoint that resolves
//! a question against the knowledge base.

use crate::{errors::AppError, state::AppState};
use axum::{extract::State, Form, Json};
use knowledgebot::{
    constants::{CONTEXT_TITLE_LIMIT, DEFAULT_PROMPT_TYPE},
    AnswerMode, ResolveOptions,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// The form body accepted by `POST /ask`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default = "default_prompt_type")]
    pub prompt_type: String,
    /// Only the literal value `"false"` disables the provider for this
    /// request; any other value (or absence) leaves the default behavior.
    #[serde(default)]
    pub force_openai: Option<String>,
}

fn default_prompt_type() -> String {
    DEFAULT_PROMPT_TYPE.to_string()
}

/// The response body for `POST /ask`.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub mode: AnswerMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The response body for the status (`/`) endpoint.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub app: &'static str,
    pub status: &'static str,
    pub mode: AnswerMode,
}

/// The handler for the root (`/`) endpoint: reports whether the provider
/// integration initialized at startup.
pub async fn root(State(app_state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        app: "KnowledgeBot",
        status: "running",
        mode: app_state.answer_client.mode(),
    })
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// The handler for `POST /ask`.
///
/// Loads the requested prompt template, renders it against the fixed
/// knowledge context, resolves the answer, and appends the interaction to
/// the log before responding.
pub async fn ask_handler(
    State(app_state): State<AppState>,
    Form(payload): Form<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    info!(question = %payload.question, prompt_type = %payload.prompt_type, "Received question");

    let template = app_state.prompt_store.load(&payload.prompt_type)?;
    let context = app_state.knowledge.context(CONTEXT_TITLE_LIMIT);

    let options = ResolveOptions {
        question: payload.question.clone(),
        prompt_type: payload.prompt_type.clone(),
        force_provider_off: payload.force_openai.as_deref() == Some("false"),
    };

    let result = app_state
        .answer_client
        .resolve(&template, &context, &options)
        .await;

    // The log is auxiliary to answering; a failed write is reported but
    // does not fail the request.
    if let Err(e) = app_state
        .log_store
        .append(&payload.question, &payload.prompt_type, &result.answer)
        .await
    {
        warn!(error = %e, "Failed to append interaction to the log");
    }

    Ok(Json(AskResponse {
        answer: result.answer,
        mode: result.mode,
        error: result.error,
    }))
}
