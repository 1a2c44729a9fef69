use super::{DbConn, now_rfc3339};
use crate::domain::{FixRecord, Language};
use anyhow::Result;

pub struct FixHistoryRepository {
    conn: DbConn,
}

impl FixHistoryRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    pub fn insert(&self, record: &FixRecord) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .expect("FixHistoryRepository: failed to acquire database lock");
        conn.execute(
            r#"
            INSERT INTO full_fix_history (original_code, fixed_code, language, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            (
                &record.original_code,
                &record.fixed_code,
                record.language.as_str(),
                now_rfc3339(),
            ),
        )?;
        Ok(())
    }

    /// Newest fixes first.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<FixRecord>> {
        let conn = self
            .conn
            .lock()
            .expect("FixHistoryRepository: failed to acquire database lock");
        let mut stmt = conn.prepare(
            "SELECT original_code, fixed_code, language FROM full_fix_history ORDER BY id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map([limit as i64], |row| {
            Ok(FixRecord {
                original_code: row.get(0)?,
                fixed_code: row.get(1)?,
                language: Language::parse(&row.get::<_, String>(2)?),
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
