//! # CSV Knowledge Base
//!
//! The knowledge base is a single CSV column loaded once at startup and
//! shared read-only for the life of the process.

use crate::errors::KnowledgeError;
use std::path::Path;
use tracing::info;

/// An in-memory, read-only list of titles backing the `{context}` block.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    titles: Vec<String>,
}

impl KnowledgeBase {
    /// Loads the designated column from a CSV file.
    ///
    /// Fails when the file cannot be read or the column header is absent;
    /// the caller treats either as fatal at startup.
    pub fn load(path: impl AsRef<Path>, column: &str) -> Result<Self, KnowledgeError> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let headers = reader.headers()?.clone();
        let column_index = headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| KnowledgeError::MissingColumn(column.to_string()))?;

        let mut titles = Vec::new();
        for record in reader.records() {
            let record = record?;
            // Short rows contribute an empty title, matching a blank cell.
            titles.push(record.get(column_index).unwrap_or_default().to_string());
        }

        info!(rows = titles.len(), column = %column, "Loaded knowledge base CSV");
        Ok(Self { titles })
    }

    /// Builds the context block: the first `limit` titles, one per line.
    ///
    /// The output depends only on the loaded data and `limit`, never on
    /// the question being asked.
    pub fn context(&self, limit: usize) -> String {
        self.titles
            .iter()
            .take(limit)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
