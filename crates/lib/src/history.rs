//! # Interaction Log
//!
//! Every handled question is appended to a single `prompt_logs` table.
//! Rows are write-once; nothing in the application updates or deletes
//! them.

use crate::errors::StorageError;
use tracing::debug;
use turso::{params, Database, Value as TursoValue};

/// One logged interaction. The timestamp is assigned by the database at
/// insert time.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub id: i64,
    pub question: String,
    pub prompt_name: String,
    pub answer: String,
    pub timestamp: String,
}

const CREATE_PROMPT_LOGS_SQL: &str = "
    CREATE TABLE IF NOT EXISTS prompt_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        question TEXT,
        prompt_name TEXT,
        answer TEXT,
        timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
    );
";

/// An append-only store for question/answer interactions.
///
/// Each operation obtains a fresh connection from the shared `Database`,
/// so the store is safe to use from concurrent request handlers; the
/// underlying store serializes row inserts.
#[derive(Clone)]
pub struct LogStore {
    db: Database,
}

impl std::fmt::Debug for LogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogStore").finish_non_exhaustive()
    }
}

impl LogStore {
    /// Opens (or creates) the database at `db_path`. Use `":memory:"` for
    /// an isolated in-memory store in tests.
    pub async fn new(db_path: &str) -> Result<Self, StorageError> {
        let db = turso::Builder::new_local(db_path)
            .build()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        // WAL keeps concurrent appends from blocking each other on
        // file-backed databases. No effect in memory, safe either way.
        let conn = db
            .connect()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        conn.query("PRAGMA journal_mode=WAL;", ())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(Self { db })
    }

    /// Creates the `prompt_logs` table if it does not already exist.
    /// Idempotent; never drops or migrates existing rows.
    pub async fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        conn.execute(CREATE_PROMPT_LOGS_SQL, ())
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;
        Ok(())
    }

    /// Appends one interaction.
    pub async fn append(
        &self,
        question: &str,
        prompt_name: &str,
        answer: &str,
    ) -> Result<(), StorageError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        conn.execute(
            "INSERT INTO prompt_logs (question, prompt_name, answer) VALUES (?, ?, ?)",
            params![question, prompt_name, answer],
        )
        .await
        .map_err(|e| StorageError::Write(e.to_string()))?;

        debug!(prompt_name = %prompt_name, "Appended interaction to log");
        Ok(())
    }

    /// Returns the most recent `limit` records, newest first.
    pub async fn recent(&self, limit: u32) -> Result<Vec<LogRecord>, StorageError> {
        let conn = self
            .db
            .connect()
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let sql = format!(
            "SELECT id, question, prompt_name, answer, timestamp
             FROM prompt_logs ORDER BY id DESC LIMIT {limit};"
        );
        let mut rows = conn
            .query(&sql, ())
            .await
            .map_err(|e| StorageError::Read(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| StorageError::Read(e.to_string()))?
        {
            let id = match row
                .get_value(0)
                .map_err(|e| StorageError::Read(e.to_string()))?
            {
                TursoValue::Integer(i) => i,
                _ => 0,
            };
            let question = match row
                .get_value(1)
                .map_err(|e| StorageError::Read(e.to_string()))?
            {
                TursoValue::Text(s) => s,
                _ => String::new(),
            };
            let prompt_name = match row
                .get_value(2)
                .map_err(|e| StorageError::Read(e.to_string()))?
            {
                TursoValue::Text(s) => s,
                _ => String::new(),
            };
            let answer = match row
                .get_value(3)
                .map_err(|e| StorageError::Read(e.to_string()))?
            {
                TursoValue::Text(s) => s,
                _ => String::new(),
            };
            let timestamp = match row
                .get_value(4)
                .map_err(|e| StorageError::Read(e.to_string()))?
            {
                TursoValue::Text(s) => s,
                _ => String::new(),
            };
            records.push(LogRecord {
                id,
                question,
                prompt_name,
                answer,
                timestamp,
            });
        }

        Ok(records)
    }
}
