use thiserror::Error;

/// Errors raised while loading a prompt template.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Prompt template '{0}' not found")]
    NotFound(String),
    #[error("Failed to read prompt template '{0}': {1}")]
    Read(String, std::io::Error),
    #[error("Failed to parse prompt template: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Errors raised while loading the CSV knowledge base.
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Failed to read knowledge CSV: {0}")]
    Read(#[from] csv::Error),
    #[error("Knowledge CSV is missing the '{0}' column")]
    MissingColumn(String),
}

/// Errors raised by an AI provider call.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    Request(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    Api(String),
    #[error("Failed to deserialize AI provider response: {0}")]
    Deserialization(reqwest::Error),
}

/// Errors raised by the interaction log store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Log store connection error: {0}")]
    Connection(String),
    #[error("Log store write failed: {0}")]
    Write(String),
    #[error("Log store read failed: {0}")]
    Read(String),
}
