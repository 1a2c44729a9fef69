use super::{DbConn, now_rfc3339};
use crate::domain::{Language, Project, ProjectDraft, ProjectId};
use anyhow::Result;

/// Repository for saved projects.
pub struct ProjectRepository {
    conn: DbConn,
}

impl ProjectRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Insert a project and return its newly assigned id.
    pub fn create(&self, draft: &ProjectDraft) -> Result<ProjectId> {
        let conn = self
            .conn
            .lock()
            .expect("ProjectRepository: failed to acquire database lock");
        conn.execute(
            r#"
            INSERT INTO projects (project_name, code, language, is_favorite, created_at)
            VALUES (?1, ?2, ?3, 0, ?4)
            "#,
            (
                &draft.name,
                &draft.code,
                draft.language.as_str(),
                now_rfc3339(),
            ),
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Newest first; ids break ties between rows created in the same instant.
    pub fn list_all(&self) -> Result<Vec<Project>> {
        let conn = self
            .conn
            .lock()
            .expect("ProjectRepository: failed to acquire database lock");
        let mut stmt = conn.prepare(
            "SELECT id, project_name, code, language, is_favorite, created_at FROM projects ORDER BY created_at DESC, id DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Project {
                id: row.get(0)?,
                name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                code: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                language: Language::parse(&row.get::<_, Option<String>>(3)?.unwrap_or_default()),
                is_favorite: row.get::<_, Option<i64>>(4)?.unwrap_or(0) != 0,
                created_at: row.get(5)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn set_favorite(&self, id: ProjectId, favorite: bool) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .expect("ProjectRepository: failed to acquire database lock");
        conn.execute(
            "UPDATE projects SET is_favorite = ?1 WHERE id = ?2",
            (favorite as i64, id),
        )?;
        Ok(())
    }

    pub fn delete(&self, id: ProjectId) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .expect("ProjectRepository: failed to acquire database lock");
        conn.execute("DELETE FROM projects WHERE id = ?1", [id])?;
        Ok(())
    }
}
