//! Reducer-style state updates + side-effect commands.

mod action;
mod command;
mod reducer;
mod runtime;

pub use action::{
    Action, AnalysisAction, AsyncAction, ChatAction, EditorAction, ProjectAction,
};
pub use command::{Command, ProjectRefreshReason};

use super::App;

impl App {
    pub fn dispatch(&mut self, action: Action) {
        let commands = reducer::reduce(&mut self.state, action);
        for command in commands {
            runtime::run(self, command);
        }
    }
}
