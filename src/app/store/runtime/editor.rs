use super::super::super::App;
use super::super::action::AsyncAction;
use crate::domain::Language;

pub fn schedule_autosave(app: &mut App, generation: u64) {
    let delay = app.autosave_delay();
    app.spawn(async move {
        tokio::time::sleep(delay).await;
        AsyncAction::AutosaveDue { generation }
    });
}

pub fn save_snapshot(app: &mut App, code: String, language: Language, autosave: bool) {
    let store = app.services().store.clone();
    app.spawn(async move {
        let result = store
            .save_snapshot(&code, &language)
            .await
            .map_err(|e| e.to_string());
        AsyncAction::SnapshotSaved { autosave, result }
    });
}

pub fn restore_snapshot(app: &mut App) {
    let store = app.services().store.clone();
    app.spawn(async move {
        let result = store.load_last_snapshot().await.map_err(|e| e.to_string());
        AsyncAction::SnapshotRestored(result)
    });
}

pub fn copy_to_clipboard(app: &mut App, text: String, success: &'static str) {
    let clipboard = app.services().clipboard.clone();
    app.spawn(async move {
        let result = tokio::task::spawn_blocking(move || clipboard.set_text(&text))
            .await
            .map_err(|e| e.to_string())
            .and_then(|r| r.map_err(|e| format!("Copy failed: {e}")))
            .map(|()| success);
        AsyncAction::Copied { result }
    });
}
