use super::super::super::output::OutputView;
use super::super::super::state::{AppState, Notice, PendingFix};
use super::super::action::AnalysisAction;
use super::super::command::Command;
use crate::domain::{
    AnalysisResult, AnalysisStatus, EMPTY_CODE_MESSAGE, ExplainMode, FIX_DISABLED_MESSAGE,
    FixRecord, RequestId, SessionError,
};

pub const OUTPUT_COPIED_MESSAGE: &str = "Output copied!";
pub const NOTHING_TO_COPY_MESSAGE: &str = "Nothing to copy!";
pub const BUSY_MESSAGE: &str = "Please wait for the current request to finish.";

pub fn reduce(state: &mut AppState, action: AnalysisAction) -> Vec<Command> {
    match action {
        AnalysisAction::Submit => submit(state),
        AnalysisAction::RequestFullFix => request_full_fix(state),
        AnalysisAction::CopyOutput => {
            let text = state.output.render_plain_text();
            if text.trim().is_empty() {
                state.notice = Some(Notice::error(NOTHING_TO_COPY_MESSAGE));
                return Vec::new();
            }
            vec![Command::CopyToClipboard {
                text: text.trim().to_string(),
                success: OUTPUT_COPIED_MESSAGE,
            }]
        }
    }
}

fn submit(state: &mut AppState) -> Vec<Command> {
    match state.session.begin_analysis(state.editor.text()) {
        Ok(request) => {
            state.output = OutputView::Loading(ExplainMode::Analyze);
            vec![Command::Explain {
                request,
                mode: ExplainMode::Analyze,
                code: state.editor.text().to_string(),
                language: state.editor.language().clone(),
            }]
        }
        Err(SessionError::EmptyCode) => {
            state.output = OutputView::Validation(EMPTY_CODE_MESSAGE.to_string());
            Vec::new()
        }
        Err(err) => {
            log::debug!("analysis not started: {err}");
            state.notice = Some(Notice::error(BUSY_MESSAGE));
            Vec::new()
        }
    }
}

fn request_full_fix(state: &mut AppState) -> Vec<Command> {
    match state.session.begin_full_fix() {
        Ok(request) => {
            let code = state.editor.text().trim().to_string();
            let language = state.editor.language().clone();
            state.output = OutputView::Loading(ExplainMode::FullFix);
            state.pending_fix = Some(PendingFix {
                request,
                code: code.clone(),
                language: language.clone(),
            });
            vec![Command::Explain {
                request,
                mode: ExplainMode::FullFix,
                code,
                language,
            }]
        }
        Err(SessionError::FullFixDisabled) => {
            state.output =
                OutputView::Result(AnalysisResult::fix_not_allowed(FIX_DISABLED_MESSAGE));
            Vec::new()
        }
        Err(err) => {
            log::debug!("full fix not started: {err}");
            state.notice = Some(Notice::error(BUSY_MESSAGE));
            Vec::new()
        }
    }
}

pub(super) fn finished(
    state: &mut AppState,
    request: RequestId,
    mode: ExplainMode,
    result: AnalysisResult,
) -> Vec<Command> {
    if let Err(err) = state.session.complete(request, &result) {
        log::debug!("discarding {mode:?} result: {err}");
        return Vec::new();
    }

    let mut commands = Vec::new();
    if mode == ExplainMode::FullFix {
        let pending = state.pending_fix.take().filter(|p| p.request == request);
        if let (AnalysisStatus::Fixed, Some(pending), Some(fixed)) =
            (result.status, pending, result.corrected_code.as_ref())
        {
            commands.push(Command::RecordFix(FixRecord {
                original_code: pending.code,
                fixed_code: fixed.clone(),
                language: pending.language,
            }));
        }
    }

    log::info!("{mode:?} request {request} finished: {}", result.status);
    state.output = OutputView::Result(result);
    commands
}
