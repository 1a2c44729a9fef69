use super::super::super::App;
use super::super::action::AsyncAction;
use crate::domain::{ChatTurn, RequestId};

pub fn ask_assistant(app: &mut App, token: RequestId, message: String) {
    let assistant = app.services().assistant.clone();
    app.spawn(async move {
        let result = assistant.ask(&message).await.map_err(|e| e.to_string());
        AsyncAction::AssistantReplied {
            token,
            message,
            result,
        }
    });
}

pub fn record_chat_turn(app: &mut App, turn: ChatTurn) {
    let store = app.services().store.clone();
    app.spawn(async move {
        let result = store.record_chat_turn(&turn).await.map_err(|e| e.to_string());
        AsyncAction::ChatTurnRecorded(result)
    });
}

pub fn load_chat_history(app: &mut App) {
    let store = app.services().store.clone();
    app.spawn(async move {
        let result = store.load_chat().await.map_err(|e| e.to_string());
        AsyncAction::ChatHistoryLoaded(result)
    });
}
