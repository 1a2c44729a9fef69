use super::super::super::state::{AppState, Notice};
use super::super::action::AsyncAction;
use super::super::command::{Command, ProjectRefreshReason};
use super::projects::PROJECT_SAVED_MESSAGE;
use super::{analysis, editor, projects};
use crate::domain::{ChatTurn, NETWORK_ERROR_TEXT};

pub fn reduce(state: &mut AppState, action: AsyncAction) -> Vec<Command> {
    match action {
        AsyncAction::AutosaveDue { generation } => {
            if !state.autosave.is_current(generation) {
                return Vec::new();
            }
            editor::snapshot_command(state, true).into_iter().collect()
        }
        AsyncAction::SnapshotSaved { autosave, result } => {
            match result {
                Ok(()) if !autosave => state.notice = Some(Notice::info("Code saved!")),
                Ok(()) => log::debug!("autosaved snapshot"),
                Err(err) if autosave => log::warn!("Auto-save failed: {err}"),
                Err(err) => {
                    log::warn!("Save failed: {err}");
                    state.notice = Some(Notice::error(err));
                }
            }
            Vec::new()
        }
        AsyncAction::SnapshotRestored(result) => {
            match result {
                Ok(Some(snapshot)) if state.editor.revision() == 0 => {
                    state.editor.load(snapshot.code, snapshot.language);
                    state.session.invalidate();
                }
                Ok(Some(_)) => log::debug!("buffer already edited; skipping restore"),
                Ok(None) => {}
                Err(err) => log::warn!("Error loading last code: {err}"),
            }
            Vec::new()
        }
        AsyncAction::AnalysisFinished {
            request,
            mode,
            result,
        } => analysis::finished(state, request, mode, result),
        AsyncAction::FixRecorded(result) => {
            if let Err(err) = result {
                log::warn!("Failed to record full fix: {err}");
            }
            Vec::new()
        }
        AsyncAction::AssistantReplied {
            token,
            message,
            result,
        } => match result {
            Ok(reply) => {
                let text = reply.display_text();
                let record = reply.is_success().then(|| ChatTurn {
                    user_message: message,
                    assistant_reply: reply.reply.unwrap_or_default(),
                    sent_at: None,
                });
                state.transcript.resolve(token, text);
                record.map(Command::RecordChatTurn).into_iter().collect()
            }
            Err(err) => {
                log::warn!("Assistant request failed: {err}");
                state.transcript.resolve(token, NETWORK_ERROR_TEXT.to_string());
                Vec::new()
            }
        },
        AsyncAction::ChatTurnRecorded(result) => {
            if let Err(err) = result {
                log::warn!("Failed to record chat turn: {err}");
            }
            Vec::new()
        }
        AsyncAction::ChatHistoryLoaded(result) => {
            match result {
                Ok(turns) => state.transcript.prepend_history(&turns),
                Err(err) => log::warn!("Chat load failed: {err}"),
            }
            Vec::new()
        }
        AsyncAction::ProjectMutated { reason, result } => {
            match &result {
                Ok(()) if reason == ProjectRefreshReason::AfterCreate => {
                    state.notice = Some(Notice::info(PROJECT_SAVED_MESSAGE));
                }
                Ok(()) => {}
                Err(err) => {
                    log::warn!("Project update failed ({reason:?}): {err}");
                    state.notice = Some(Notice::error(err.clone()));
                }
            }
            vec![projects::refresh(state, reason)]
        }
        AsyncAction::ProjectsLoaded { seq, reason, result } => {
            if !state.projects.accept(seq) {
                log::debug!("dropping stale project list {seq} ({reason:?})");
                return Vec::new();
            }
            match result {
                Ok(list) => {
                    state.projects.projects = list;
                    state.projects.error = None;
                }
                Err(err) => {
                    log::warn!("Error loading projects: {err}");
                    state.projects.error = Some(err);
                }
            }
            Vec::new()
        }
        AsyncAction::Copied { result } => {
            state.notice = Some(match result {
                Ok(message) => Notice::info(message),
                Err(err) => {
                    log::warn!("Clipboard unavailable: {err}");
                    Notice::error(err)
                }
            });
            Vec::new()
        }
    }
}
