use super::super::super::App;
use super::super::action::AsyncAction;
use crate::domain::{AnalysisResult, ExplainMode, FixRecord, Language, RequestId};

pub fn explain(
    app: &mut App,
    request: RequestId,
    mode: ExplainMode,
    code: String,
    language: Language,
) {
    let backend = app.services().analysis.clone();
    app.spawn(async move {
        let result = match backend.explain(&code, &language, mode).await {
            Ok(reply) => AnalysisResult::from_reply(mode, reply),
            Err(err) => {
                log::warn!("{mode:?} request {request} failed: {err}");
                AnalysisResult::transport_failure(mode)
            }
        };
        AsyncAction::AnalysisFinished {
            request,
            mode,
            result,
        }
    });
}

pub fn record_fix(app: &mut App, record: FixRecord) {
    let store = app.services().store.clone();
    app.spawn(async move {
        let result = store.record_fix(&record).await.map_err(|e| e.to_string());
        AsyncAction::FixRecorded(result)
    });
}
