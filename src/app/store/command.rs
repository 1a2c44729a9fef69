use crate::domain::{ChatTurn, ExplainMode, FixRecord, Language, ProjectDraft, ProjectId, RequestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectRefreshReason {
    Startup,
    Manual,
    AfterCreate,
    AfterFavorite,
    AfterDelete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ScheduleAutosave {
        generation: u64,
    },
    SaveSnapshot {
        code: String,
        language: Language,
        autosave: bool,
    },
    RestoreSnapshot,
    Explain {
        request: RequestId,
        mode: ExplainMode,
        code: String,
        language: Language,
    },
    RecordFix(FixRecord),
    AskAssistant {
        token: RequestId,
        message: String,
    },
    RecordChatTurn(ChatTurn),
    LoadChatHistory,
    CreateProject(ProjectDraft),
    SetFavorite {
        id: ProjectId,
        favorite: bool,
    },
    DeleteProject {
        id: ProjectId,
    },
    RefreshProjects {
        seq: u64,
        reason: ProjectRefreshReason,
    },
    CopyToClipboard {
        text: String,
        success: &'static str,
    },
}
