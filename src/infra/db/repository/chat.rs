use super::{DbConn, now_rfc3339};
use crate::domain::ChatTurn;
use anyhow::Result;

/// Repository for assistant exchanges (`ai_chat`).
pub struct ChatRepository {
    conn: DbConn,
}

impl ChatRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    pub fn append(&self, user_message: &str, assistant_reply: &str) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .expect("ChatRepository: failed to acquire database lock");
        conn.execute(
            "INSERT INTO ai_chat (user_message, ai_response, created_at) VALUES (?1, ?2, ?3)",
            (user_message, assistant_reply, now_rfc3339()),
        )?;
        Ok(())
    }

    /// All turns in display order (oldest first).
    pub fn list_all(&self) -> Result<Vec<ChatTurn>> {
        let conn = self
            .conn
            .lock()
            .expect("ChatRepository: failed to acquire database lock");
        let mut stmt = conn
            .prepare("SELECT user_message, ai_response, created_at FROM ai_chat ORDER BY id ASC")?;

        let rows = stmt.query_map([], |row| {
            Ok(ChatTurn {
                user_message: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                assistant_reply: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                sent_at: row.get(2)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
