use super::{DbConn, now_rfc3339};
use crate::domain::{CodeSnapshot, Language};
use anyhow::Result;
use rusqlite::OptionalExtension;

/// Repository for the append-only `code_history` table.
pub struct SnapshotRepository {
    conn: DbConn,
}

impl SnapshotRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    pub fn insert(&self, code: &str, language: &Language) -> Result<i64> {
        let conn = self
            .conn
            .lock()
            .expect("SnapshotRepository: failed to acquire database lock");
        conn.execute(
            "INSERT INTO code_history (code, language, created_at) VALUES (?1, ?2, ?3)",
            (code, language.as_str(), now_rfc3339()),
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn latest(&self) -> Result<Option<CodeSnapshot>> {
        let conn = self
            .conn
            .lock()
            .expect("SnapshotRepository: failed to acquire database lock");
        conn.query_row(
            "SELECT code, language, created_at FROM code_history ORDER BY id DESC LIMIT 1",
            [],
            |row| {
                Ok(CodeSnapshot {
                    code: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                    language: Language::parse(
                        &row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    ),
                    captured_at: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(Into::into)
    }

    pub fn count(&self) -> Result<i64> {
        let conn = self
            .conn
            .lock()
            .expect("SnapshotRepository: failed to acquire database lock");
        let count = conn.query_row("SELECT COUNT(*) FROM code_history", [], |row| row.get(0))?;
        Ok(count)
    }
}
