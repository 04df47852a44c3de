//! # Prompt Template Store
//!
//! Templates live as YAML files on disk, one per prompt type
//! (`{dir}/{prompt_type}.yaml`). They are re-read on every request, so
//! edits take effect without a restart.

use crate::errors::TemplateError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A named prompt template containing `{context}` and `{question}`
/// placeholders.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptTemplate {
    #[serde(skip)]
    pub name: String,
    pub template: String,
}

impl PromptTemplate {
    /// Substitutes both placeholders with literal replace-all semantics.
    ///
    /// No escaping is performed: `{question}` text occurring inside the
    /// substituted context value is itself replaced by the second pass.
    pub fn render(&self, context: &str, question: &str) -> String {
        self.template
            .replace("{context}", context)
            .replace("{question}", question)
    }
}

/// Loads prompt templates by type from a directory of YAML files.
#[derive(Debug, Clone)]
pub struct PromptStore {
    dir: PathBuf,
}

impl PromptStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Reads and deserializes `{dir}/{prompt_type}.yaml`.
    pub fn load(&self, prompt_type: &str) -> Result<PromptTemplate, TemplateError> {
        let path = self.dir.join(format!("{prompt_type}.yaml"));
        if !path.exists() {
            return Err(TemplateError::NotFound(prompt_type.to_string()));
        }

        let raw = fs::read_to_string(&path)
            .map_err(|e| TemplateError::Read(prompt_type.to_string(), e))?;
        let mut template: PromptTemplate = serde_yaml::from_str(&raw)?;
        template.name = prompt_type.to_string();

        debug!(path = %path.display(), "Loaded prompt template");
        Ok(template)
    }
}
