use super::super::super::state::{AppState, Notice};
use super::super::action::EditorAction;
use super::super::command::Command;

pub const CODE_COPIED_MESSAGE: &str = "Code copied from editor!";

pub fn reduce(state: &mut AppState, action: EditorAction) -> Vec<Command> {
    match action {
        EditorAction::Edit(text) => {
            state.editor.edit(text);
            buffer_changed(state)
        }
        EditorAction::Open { text, language } => {
            state.editor.load(text, language);
            state.session.invalidate();
            Vec::new()
        }
        EditorAction::Indent { selection } => {
            state.editor.indent(selection);
            buffer_changed(state)
        }
        EditorAction::SetLanguage(language) => {
            if state.editor.language() != &language {
                state.editor.set_language(language);
                state.session.invalidate();
            }
            Vec::new()
        }
        EditorAction::Save => match snapshot_command(state, false) {
            Some(command) => vec![command],
            None => {
                state.notice = Some(Notice::error("Nothing to save!"));
                Vec::new()
            }
        },
        EditorAction::CopyBuffer => vec![Command::CopyToClipboard {
            text: state.editor.text().to_string(),
            success: CODE_COPIED_MESSAGE,
        }],
        EditorAction::DismissNotice => {
            state.notice = None;
            Vec::new()
        }
    }
}

/// Every user edit invalidates the analysis and re-arms the autosave timer.
fn buffer_changed(state: &mut AppState) -> Vec<Command> {
    state.session.invalidate();
    let generation = state.autosave.arm();
    vec![Command::ScheduleAutosave { generation }]
}

/// Save command for the current buffer, or `None` when it is blank.
pub(super) fn snapshot_command(state: &AppState, autosave: bool) -> Option<Command> {
    if state.editor.is_blank() {
        return None;
    }
    Some(Command::SaveSnapshot {
        code: state.editor.text().trim().to_string(),
        language: state.editor.language().clone(),
        autosave,
    })
}
