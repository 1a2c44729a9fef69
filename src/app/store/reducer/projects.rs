use super::super::super::state::AppState;
use super::super::action::ProjectAction;
use super::super::command::{Command, ProjectRefreshReason};
use crate::domain::ProjectDraft;

pub const PROJECT_SAVED_MESSAGE: &str = "Project saved!";

pub fn reduce(state: &mut AppState, action: ProjectAction) -> Vec<Command> {
    match action {
        ProjectAction::Create { name } => {
            let draft = ProjectDraft::new(
                &name,
                state.editor.text(),
                state.editor.language().clone(),
            );
            match draft {
                Some(draft) => vec![Command::CreateProject(draft)],
                None => Vec::new(),
            }
        }
        ProjectAction::ToggleFavorite { id } => match state.projects.find(id) {
            Some(project) => vec![Command::SetFavorite {
                id,
                favorite: !project.is_favorite,
            }],
            None => {
                log::debug!("toggle favorite: project {id} not in list");
                Vec::new()
            }
        },
        ProjectAction::SetFavorite { id, favorite } => {
            vec![Command::SetFavorite { id, favorite }]
        }
        ProjectAction::Delete { id } => vec![Command::DeleteProject { id }],
        ProjectAction::LoadIntoEditor { id } => {
            let Some(project) = state.projects.find(id).cloned() else {
                log::debug!("load into editor: project {id} not in list");
                return Vec::new();
            };
            state.editor.load(project.code, project.language);
            state.session.invalidate();
            Vec::new()
        }
        ProjectAction::Refresh => vec![refresh(state, ProjectRefreshReason::Manual)],
    }
}

pub(super) fn refresh(state: &mut AppState, reason: ProjectRefreshReason) -> Command {
    let seq = state.projects.next_refresh();
    Command::RefreshProjects { seq, reason }
}
