pub mod analysis;
pub mod async_handler;
pub mod chat;
pub mod editor;
pub mod projects;

use super::super::state::AppState;
use super::action::Action;
use super::command::{Command, ProjectRefreshReason};

pub fn reduce(state: &mut AppState, action: Action) -> Vec<Command> {
    match action {
        Action::Startup => startup(state),
        Action::Editor(action) => editor::reduce(state, action),
        Action::Analysis(action) => analysis::reduce(state, action),
        Action::Chat(action) => chat::reduce(&mut state.transcript, action),
        Action::Project(action) => projects::reduce(state, action),
        Action::Async(action) => async_handler::reduce(state, action),
    }
}

fn startup(state: &mut AppState) -> Vec<Command> {
    vec![
        Command::LoadChatHistory,
        Command::RestoreSnapshot,
        projects::refresh(state, ProjectRefreshReason::Startup),
    ]
}

#[cfg(test)]
mod tests;
