use super::super::action::ChatAction;
use super::super::command::Command;
use crate::domain::Transcript;

pub fn reduce(transcript: &mut Transcript, action: ChatAction) -> Vec<Command> {
    match action {
        ChatAction::Send(text) => match transcript.begin(&text) {
            Some(token) => vec![Command::AskAssistant {
                token,
                message: text.trim().to_string(),
            }],
            None => Vec::new(),
        },
        ChatAction::LoadHistory => vec![Command::LoadChatHistory],
    }
}
