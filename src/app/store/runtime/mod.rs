pub mod analysis;
pub mod chat;
pub mod editor;
pub mod projects;


use super::super::App;
use super::command::Command;

pub fn run(app: &mut App, command: Command) {
    match command {
        Command::ScheduleAutosave { generation } => editor::schedule_autosave(app, generation),
        Command::SaveSnapshot {
            code,
            language,
            autosave,
        } => editor::save_snapshot(app, code, language, autosave),
        Command::RestoreSnapshot => editor::restore_snapshot(app),
        Command::CopyToClipboard { text, success } => editor::copy_to_clipboard(app, text, success),
        Command::Explain {
            request,
            mode,
            code,
            language,
        } => analysis::explain(app, request, mode, code, language),
        Command::RecordFix(record) => analysis::record_fix(app, record),
        Command::AskAssistant { token, message } => chat::ask_assistant(app, token, message),
        Command::RecordChatTurn(turn) => chat::record_chat_turn(app, turn),
        Command::LoadChatHistory => chat::load_chat_history(app),
        Command::CreateProject(draft) => projects::create_project(app, draft),
        Command::SetFavorite { id, favorite } => projects::set_favorite(app, id, favorite),
        Command::DeleteProject { id } => projects::delete_project(app, id),
        Command::RefreshProjects { seq, reason } => projects::refresh_projects(app, seq, reason),
    }
}
