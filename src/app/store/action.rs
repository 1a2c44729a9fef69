use std::ops::Range;

use crate::domain::{
    AnalysisResult, AssistantReply, ChatTurn, CodeSnapshot, ExplainMode, Language, Project,
    ProjectId, RequestId,
};

use super::command::ProjectRefreshReason;

#[derive(Debug)]
pub enum Action {
    /// Restore the last snapshot, load chat history and the project list.
    Startup,
    Editor(EditorAction),
    Analysis(AnalysisAction),
    Chat(ChatAction),
    Project(ProjectAction),
    Async(AsyncAction),
}

#[derive(Debug)]
pub enum EditorAction {
    /// The user replaced the buffer contents.
    Edit(String),
    /// Load a file into the buffer. Not an edit: nothing is autosaved.
    Open { text: String, language: Language },
    SetLanguage(Language),
    /// Tab key over a byte selection.
    Indent { selection: Range<usize> },
    /// Persist the buffer now instead of waiting for the autosave.
    Save,
    CopyBuffer,
    DismissNotice,
}

#[derive(Debug)]
pub enum AnalysisAction {
    Submit,
    RequestFullFix,
    CopyOutput,
}

#[derive(Debug)]
pub enum ChatAction {
    Send(String),
    LoadHistory,
}

#[derive(Debug)]
pub enum ProjectAction {
    Create { name: String },
    ToggleFavorite { id: ProjectId },
    SetFavorite { id: ProjectId, favorite: bool },
    Delete { id: ProjectId },
    LoadIntoEditor { id: ProjectId },
    Refresh,
}

#[derive(Debug)]
pub enum AsyncAction {
    AutosaveDue {
        generation: u64,
    },
    SnapshotSaved {
        autosave: bool,
        result: Result<(), String>,
    },
    SnapshotRestored(Result<Option<CodeSnapshot>, String>),
    AnalysisFinished {
        request: RequestId,
        mode: ExplainMode,
        result: AnalysisResult,
    },
    FixRecorded(Result<(), String>),
    AssistantReplied {
        token: RequestId,
        message: String,
        result: Result<AssistantReply, String>,
    },
    ChatTurnRecorded(Result<(), String>),
    ChatHistoryLoaded(Result<Vec<ChatTurn>, String>),
    ProjectMutated {
        reason: ProjectRefreshReason,
        result: Result<(), String>,
    },
    ProjectsLoaded {
        seq: u64,
        reason: ProjectRefreshReason,
        result: Result<Vec<Project>, String>,
    },
    Copied {
        result: Result<&'static str, String>,
    },
}
