use super::super::super::App;
use super::super::action::AsyncAction;
use super::super::command::ProjectRefreshReason;
use crate::domain::{ProjectDraft, ProjectId};

pub fn create_project(app: &mut App, draft: ProjectDraft) {
    let store = app.services().store.clone();
    app.spawn(async move {
        let result = store
            .create_project(&draft)
            .await
            .map_err(|e| format!("Failed to save project: {e}"));
        AsyncAction::ProjectMutated {
            reason: ProjectRefreshReason::AfterCreate,
            result,
        }
    });
}

pub fn set_favorite(app: &mut App, id: ProjectId, favorite: bool) {
    let store = app.services().store.clone();
    app.spawn(async move {
        let result = store
            .set_favorite(id, favorite)
            .await
            .map_err(|e| format!("Failed to update favorite: {e}"));
        AsyncAction::ProjectMutated {
            reason: ProjectRefreshReason::AfterFavorite,
            result,
        }
    });
}

pub fn delete_project(app: &mut App, id: ProjectId) {
    let store = app.services().store.clone();
    app.spawn(async move {
        let result = store
            .delete_project(id)
            .await
            .map_err(|e| format!("Failed to delete project: {e}"));
        AsyncAction::ProjectMutated {
            reason: ProjectRefreshReason::AfterDelete,
            result,
        }
    });
}

pub fn refresh_projects(app: &mut App, seq: u64, reason: ProjectRefreshReason) {
    let store = app.services().store.clone();
    app.spawn(async move {
        let result = store
            .list_projects()
            .await
            .map_err(|e| format!("Failed to load projects: {e}"));
        AsyncAction::ProjectsLoaded {
            seq,
            reason,
            result,
        }
    });
}
