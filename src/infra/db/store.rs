//! `PersistenceGateway` backed by the local SQLite database.

use async_trait::async_trait;

use super::database::Database;
use crate::application::gateway::PersistenceGateway;
use crate::domain::{
    ChatTurn, ClientError, CodeSnapshot, FixRecord, Language, Project, ProjectDraft, ProjectId,
};

/// Offline store used with `--local` or `storage = "local"`.
///
/// Repository calls are blocking, so each one runs on the blocking pool.
#[derive(Clone)]
pub struct LocalStore {
    db: std::sync::Arc<Database>,
}

impl LocalStore {
    pub fn new(db: Database) -> Self {
        Self {
            db: std::sync::Arc::new(db),
        }
    }

    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self::new(Database::open()?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, ClientError>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| ClientError::Storage(anyhow::anyhow!("storage task failed: {e}")))?
            .map_err(ClientError::Storage)
    }

    /// Most recent full fixes, newest first.
    pub async fn recent_fixes(&self, limit: usize) -> Result<Vec<FixRecord>, ClientError> {
        self.blocking(move |db| db.fix_history_repo().list_recent(limit))
            .await
    }
}

#[async_trait]
impl PersistenceGateway for LocalStore {
    async fn save_snapshot(&self, code: &str, language: &Language) -> Result<(), ClientError> {
        let code = code.to_string();
        let language = language.clone();
        self.blocking(move |db| db.snapshot_repo().insert(&code, &language).map(|_| ()))
            .await
    }

    async fn load_last_snapshot(&self) -> Result<Option<CodeSnapshot>, ClientError> {
        self.blocking(|db| db.snapshot_repo().latest()).await
    }

    async fn load_chat(&self) -> Result<Vec<ChatTurn>, ClientError> {
        self.blocking(|db| db.chat_repo().list_all()).await
    }

    async fn create_project(&self, draft: &ProjectDraft) -> Result<(), ClientError> {
        let draft = draft.clone();
        let id = self
            .blocking(move |db| db.project_repo().create(&draft))
            .await?;
        log::debug!("created local project {id}");
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        self.blocking(|db| db.project_repo().list_all()).await
    }

    async fn set_favorite(&self, id: ProjectId, favorite: bool) -> Result<(), ClientError> {
        self.blocking(move |db| db.project_repo().set_favorite(id, favorite))
            .await
    }

    async fn delete_project(&self, id: ProjectId) -> Result<(), ClientError> {
        self.blocking(move |db| db.project_repo().delete(id)).await
    }

    async fn record_chat_turn(&self, turn: &ChatTurn) -> Result<(), ClientError> {
        let turn = turn.clone();
        self.blocking(move |db| {
            db.chat_repo()
                .append(&turn.user_message, &turn.assistant_reply)
        })
        .await
    }

    async fn record_fix(&self, record: &FixRecord) -> Result<(), ClientError> {
        let record = record.clone();
        self.blocking(move |db| db.fix_history_repo().insert(&record))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> LocalStore {
        LocalStore::new(Database::open_in_memory().unwrap())
    }

    #[tokio::test]
    async fn snapshot_round_trip_keeps_latest() {
        let store = store();
        assert!(store.load_last_snapshot().await.unwrap().is_none());

        store.save_snapshot("a", &Language::C).await.unwrap();
        store.save_snapshot("b", &Language::Rust).await.unwrap();

        let latest = store.load_last_snapshot().await.unwrap().unwrap();
        assert_eq!(latest.code, "b");
        assert_eq!(latest.language, Language::Rust);
    }

    #[tokio::test]
    async fn recorded_turns_come_back_in_order() {
        let store = store();
        for (q, a) in [("hi", "hello"), ("why", "because")] {
            store
                .record_chat_turn(&ChatTurn {
                    user_message: q.into(),
                    assistant_reply: a.into(),
                    sent_at: None,
                })
                .await
                .unwrap();
        }

        let chat = store.load_chat().await.unwrap();
        assert_eq!(chat.len(), 2);
        assert_eq!(chat[0].user_message, "hi");
        assert_eq!(chat[1].assistant_reply, "because");
        assert!(chat[1].sent_at.is_some());
    }

    #[tokio::test]
    async fn project_mutations_are_visible_in_listing() {
        let store = store();
        let draft = ProjectDraft::new("demo", "int main(){}", Language::Cpp).unwrap();
        store.create_project(&draft).await.unwrap();

        let projects = store.list_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        let id = projects[0].id;
        assert!(!projects[0].is_favorite);

        store.set_favorite(id, true).await.unwrap();
        assert!(store.list_projects().await.unwrap()[0].is_favorite);

        store.delete_project(id).await.unwrap();
        assert!(store.list_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn fixes_are_kept_newest_first() {
        let store = store();
        for n in 1..=3 {
            store
                .record_fix(&FixRecord {
                    original_code: format!("bad {n}"),
                    fixed_code: format!("good {n}"),
                    language: Language::Python,
                })
                .await
                .unwrap();
        }

        let fixes = store.recent_fixes(10).await.unwrap();
        assert_eq!(fixes.len(), 3);
        assert_eq!(fixes[0].fixed_code, "good 3");
    }
}
