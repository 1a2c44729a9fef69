//! Boundaries to the outside world: persistence, analysis and the assistant.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    AssistantReply, ChatTurn, ClientError, CodeSnapshot, ExplainMode, ExplainReply, FixRecord,
    Language, Project, ProjectDraft, ProjectId,
};

/// Durable storage for snapshots, chat turns and projects.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    async fn save_snapshot(&self, code: &str, language: &Language) -> Result<(), ClientError>;

    /// Most recent snapshot, if any was ever saved.
    async fn load_last_snapshot(&self) -> Result<Option<CodeSnapshot>, ClientError>;

    /// All stored chat turns, oldest first.
    async fn load_chat(&self) -> Result<Vec<ChatTurn>, ClientError>;

    async fn create_project(&self, draft: &ProjectDraft) -> Result<(), ClientError>;

    async fn list_projects(&self) -> Result<Vec<Project>, ClientError>;

    async fn set_favorite(&self, id: ProjectId, favorite: bool) -> Result<(), ClientError>;

    async fn delete_project(&self, id: ProjectId) -> Result<(), ClientError>;

    /// Remember a completed assistant exchange. The remote server records
    /// these itself, so only local stores need to override this.
    async fn record_chat_turn(&self, _turn: &ChatTurn) -> Result<(), ClientError> {
        Ok(())
    }

    /// Remember a successful full fix. Only the local store keeps fix history.
    async fn record_fix(&self, _record: &FixRecord) -> Result<(), ClientError> {
        Ok(())
    }
}

/// The `/explain` endpoint.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn explain(
        &self,
        code: &str,
        language: &Language,
        mode: ExplainMode,
    ) -> Result<ExplainReply, ClientError>;
}

/// The `/assistant` endpoint.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    async fn ask(&self, message: &str) -> Result<AssistantReply, ClientError>;
}

/// Destination of the copy actions.
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> anyhow::Result<()>;
}

/// Everything the runtime needs to talk to.
#[derive(Clone)]
pub struct Services {
    pub analysis: Arc<dyn AnalysisBackend>,
    pub assistant: Arc<dyn AssistantBackend>,
    pub store: Arc<dyn PersistenceGateway>,
    pub clipboard: Arc<dyn ClipboardSink>,
}
