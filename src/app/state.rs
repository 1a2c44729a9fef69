use crate::domain::{
    AnalysisSession, EditorBuffer, Language, Project, ProjectId, RequestId, Transcript,
};

use super::output::OutputView;

/// Short message shown after an action ("Project saved!", copy results, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Sidebar list of saved projects, as last fetched from the store.
#[derive(Debug, Default)]
pub struct ProjectRegistry {
    pub projects: Vec<Project>,
    pub error: Option<String>,
    pub is_loading: bool,
    issued_seq: u64,
    applied_seq: u64,
}

impl ProjectRegistry {
    pub fn find(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub(crate) fn next_refresh(&mut self) -> u64 {
        self.issued_seq += 1;
        self.is_loading = true;
        self.issued_seq
    }

    /// Whether a listing issued as `seq` is newer than what is displayed.
    pub(crate) fn accept(&mut self, seq: u64) -> bool {
        if seq <= self.applied_seq {
            return false;
        }
        self.applied_seq = seq;
        self.is_loading = seq < self.issued_seq;
        true
    }
}

/// Single-slot debounce for autosave: only the newest generation may save.
#[derive(Debug, Default)]
pub struct AutosaveSlot {
    generation: u64,
}

impl AutosaveSlot {
    pub(crate) fn arm(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

/// Input of the full fix currently in flight, kept for the fix history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFix {
    pub request: RequestId,
    pub code: String,
    pub language: Language,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub editor: EditorBuffer,
    pub session: AnalysisSession,
    pub output: OutputView,
    pub pending_fix: Option<PendingFix>,
    pub transcript: Transcript,
    pub projects: ProjectRegistry,
    pub autosave: AutosaveSlot,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(language: Language) -> Self {
        Self {
            editor: EditorBuffer::new(language),
            ..Default::default()
        }
    }
}
