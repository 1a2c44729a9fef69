use super::*;
use crate::app::output::OutputView;
use crate::app::state::AppState;
use crate::app::store::action::{
    AnalysisAction, AsyncAction, ChatAction, EditorAction, ProjectAction,
};
use crate::domain::{
    AnalysisResult, AnalysisStatus, AssistantReply, CodeSnapshot, EMPTY_CODE_MESSAGE,
    ExplainMode, ExplainReply, Finding, Language, NETWORK_ERROR_TEXT, Project, ProjectDraft,
    RequestId, TranscriptEntry,
};

fn issues_found() -> AnalysisResult {
    AnalysisResult::from_reply(
        ExplainMode::Analyze,
        ExplainReply {
            status: Some("error".into()),
            analysis: Some(vec![Finding {
                line: Some(1),
                issue: "Expected expression".into(),
                detail: "`=` must be followed by a value".into(),
            }]),
            ..Default::default()
        },
    )
}

fn project(id: i64, name: &str, favorite: bool) -> Project {
    Project {
        id,
        name: name.into(),
        code: format!("// {name}"),
        language: Language::Go,
        is_favorite: favorite,
        created_at: None,
    }
}

fn edit(state: &mut AppState, text: &str) -> Vec<Command> {
    reduce(state, Action::Editor(EditorAction::Edit(text.into())))
}

fn submit(state: &mut AppState) -> RequestId {
    match reduce(state, Action::Analysis(AnalysisAction::Submit)).as_slice() {
        [Command::Explain { request, mode: ExplainMode::Analyze, .. }] => *request,
        other => panic!("expected explain command, got {other:?}"),
    }
}

fn finish(
    state: &mut AppState,
    request: RequestId,
    mode: ExplainMode,
    result: AnalysisResult,
) -> Vec<Command> {
    reduce(
        state,
        Action::Async(AsyncAction::AnalysisFinished {
            request,
            mode,
            result,
        }),
    )
}

#[test]
fn startup_loads_history_snapshot_and_projects() {
    let mut state = AppState::default();
    let commands = reduce(&mut state, Action::Startup);

    assert_eq!(
        commands,
        vec![
            Command::LoadChatHistory,
            Command::RestoreSnapshot,
            Command::RefreshProjects {
                seq: 1,
                reason: ProjectRefreshReason::Startup
            },
        ]
    );
    assert!(state.projects.is_loading);
}

#[test]
fn empty_submit_shows_validation_without_request() {
    let mut state = AppState::default();
    edit(&mut state, "   \n");

    let commands = reduce(&mut state, Action::Analysis(AnalysisAction::Submit));

    assert!(commands.is_empty());
    assert_eq!(
        state.output,
        OutputView::Validation(EMPTY_CODE_MESSAGE.to_string())
    );
    assert!(!state.session.full_fix_enabled());
}

#[test]
fn issues_found_enables_full_fix_and_fix_is_recorded() {
    let mut state = AppState::new(Language::Cpp);
    edit(&mut state, "int x = ;\n");

    let request = submit(&mut state);
    assert_eq!(state.output, OutputView::Loading(ExplainMode::Analyze));
    finish(&mut state, request, ExplainMode::Analyze, issues_found());
    assert!(state.session.full_fix_enabled());

    let commands = reduce(&mut state, Action::Analysis(AnalysisAction::RequestFullFix));
    let fix_request = match commands.as_slice() {
        [Command::Explain {
            request,
            mode: ExplainMode::FullFix,
            code,
            language,
        }] => {
            assert_eq!(code, "int x = ;");
            assert_eq!(language, &Language::Cpp);
            *request
        }
        other => panic!("expected full fix request, got {other:?}"),
    };

    let fixed = AnalysisResult::from_reply(
        ExplainMode::FullFix,
        ExplainReply {
            corrected_code: Some("int x = 0;".into()),
            ..Default::default()
        },
    );
    let commands = finish(&mut state, fix_request, ExplainMode::FullFix, fixed);

    assert!(!state.session.full_fix_enabled());
    assert!(matches!(
        commands.as_slice(),
        [Command::RecordFix(record)] if record.original_code == "int x = ;" && record.fixed_code == "int x = 0;"
    ));
    assert_eq!(
        state.output.result().map(|r| r.status),
        Some(AnalysisStatus::Fixed)
    );
}

#[test]
fn full_fix_before_analysis_is_rejected_locally() {
    let mut state = AppState::default();
    edit(&mut state, "int x = ;");

    let commands = reduce(&mut state, Action::Analysis(AnalysisAction::RequestFullFix));

    assert!(commands.is_empty());
    assert_eq!(
        state.output.result().map(|r| r.status),
        Some(AnalysisStatus::FixNotAllowed)
    );
}

#[test]
fn non_issue_outcomes_disable_full_fix() {
    for result in [
        AnalysisResult::from_reply(
            ExplainMode::Analyze,
            ExplainReply {
                status: Some("success".into()),
                ..Default::default()
            },
        ),
        AnalysisResult::from_reply(
            ExplainMode::Analyze,
            ExplainReply {
                status: Some("language_mismatch".into()),
                ..Default::default()
            },
        ),
        AnalysisResult::transport_failure(ExplainMode::Analyze),
    ] {
        let mut state = AppState::default();
        edit(&mut state, "x");
        let first = submit(&mut state);
        finish(&mut state, first, ExplainMode::Analyze, issues_found());
        let second = submit(&mut state);
        finish(&mut state, second, ExplainMode::Analyze, result);
        assert!(!state.session.full_fix_enabled());
    }
}

#[test]
fn edit_invalidates_enabled_full_fix() {
    let mut state = AppState::default();
    edit(&mut state, "int x = ;");
    let request = submit(&mut state);
    finish(&mut state, request, ExplainMode::Analyze, issues_found());

    edit(&mut state, "int x = 1;");
    assert!(!state.session.full_fix_enabled());
}

#[test]
fn edit_while_pending_keeps_gate_closed() {
    let mut state = AppState::default();
    edit(&mut state, "int x = ;");
    let request = submit(&mut state);
    edit(&mut state, "int y = ;");

    finish(&mut state, request, ExplainMode::Analyze, issues_found());

    assert!(!state.session.full_fix_enabled());
    assert_eq!(
        state.output.result().map(|r| r.status),
        Some(AnalysisStatus::IssuesFound)
    );
}

#[test]
fn submit_while_busy_is_refused() {
    let mut state = AppState::default();
    edit(&mut state, "x");
    submit(&mut state);

    let commands = reduce(&mut state, Action::Analysis(AnalysisAction::Submit));

    assert!(commands.is_empty());
    assert!(state.notice.as_ref().is_some_and(|n| n.is_error));
}

#[test]
fn stale_analysis_result_is_ignored() {
    let mut state = AppState::default();
    edit(&mut state, "x");
    let request = submit(&mut state);
    finish(&mut state, request, ExplainMode::Analyze, issues_found());

    let late = AnalysisResult::transport_failure(ExplainMode::Analyze);
    finish(&mut state, request, ExplainMode::Analyze, late);

    assert!(state.session.full_fix_enabled());
    assert_eq!(
        state.output.result().map(|r| r.status),
        Some(AnalysisStatus::IssuesFound)
    );
}

#[test]
fn only_latest_autosave_generation_saves_trimmed_buffer() {
    let mut state = AppState::new(Language::Python);
    let first = edit(&mut state, "print(1)");
    let second = edit(&mut state, "  print(2)\n");
    assert_eq!(first, vec![Command::ScheduleAutosave { generation: 1 }]);
    assert_eq!(second, vec![Command::ScheduleAutosave { generation: 2 }]);

    let stale = reduce(
        &mut state,
        Action::Async(AsyncAction::AutosaveDue { generation: 1 }),
    );
    assert!(stale.is_empty());

    let due = reduce(
        &mut state,
        Action::Async(AsyncAction::AutosaveDue { generation: 2 }),
    );
    assert_eq!(
        due,
        vec![Command::SaveSnapshot {
            code: "print(2)".into(),
            language: Language::Python,
            autosave: true,
        }]
    );
}

#[test]
fn blank_buffer_is_not_autosaved() {
    let mut state = AppState::default();
    edit(&mut state, "  ");
    let due = reduce(
        &mut state,
        Action::Async(AsyncAction::AutosaveDue { generation: 1 }),
    );
    assert!(due.is_empty());
}

#[test]
fn language_change_does_not_autosave() {
    let mut state = AppState::default();
    let commands = reduce(
        &mut state,
        Action::Editor(EditorAction::SetLanguage(Language::Rust)),
    );
    assert!(commands.is_empty());
    assert_eq!(state.editor.language(), &Language::Rust);
}

#[test]
fn restore_only_fills_untouched_buffer() {
    let snapshot = CodeSnapshot {
        code: "fn main() {}".into(),
        language: Language::Rust,
        captured_at: None,
    };

    let mut fresh = AppState::default();
    let commands = reduce(
        &mut fresh,
        Action::Async(AsyncAction::SnapshotRestored(Ok(Some(snapshot.clone())))),
    );
    assert!(commands.is_empty());
    assert_eq!(fresh.editor.text(), "fn main() {}");
    assert_eq!(fresh.editor.language(), &Language::Rust);

    let mut edited = AppState::default();
    edit(&mut edited, "typed first");
    reduce(
        &mut edited,
        Action::Async(AsyncAction::SnapshotRestored(Ok(Some(snapshot)))),
    );
    assert_eq!(edited.editor.text(), "typed first");
}

#[test]
fn chat_reply_replaces_placeholder_and_is_recorded() {
    let mut state = AppState::default();
    let commands = reduce(
        &mut state,
        Action::Chat(ChatAction::Send("  what is RAII?  ".into())),
    );
    let token = match commands.as_slice() {
        [Command::AskAssistant { token, message }] => {
            assert_eq!(message, "what is RAII?");
            *token
        }
        other => panic!("expected assistant request, got {other:?}"),
    };

    let commands = reduce(
        &mut state,
        Action::Async(AsyncAction::AssistantReplied {
            token,
            message: "what is RAII?".into(),
            result: Ok(AssistantReply {
                status: Some("success".into()),
                reply: Some("**Resource** acquisition".into()),
            }),
        }),
    );

    assert_eq!(
        state.transcript.entries(),
        &[
            TranscriptEntry::User("what is RAII?".into()),
            TranscriptEntry::Assistant("Resource acquisition".into()),
        ]
    );
    assert!(matches!(
        commands.as_slice(),
        [Command::RecordChatTurn(turn)] if turn.user_message == "what is RAII?"
    ));
}

#[test]
fn chat_transport_failure_shows_network_error() {
    let mut state = AppState::default();
    reduce(&mut state, Action::Chat(ChatAction::Send("hi".into())));

    let commands = reduce(
        &mut state,
        Action::Async(AsyncAction::AssistantReplied {
            token: 1,
            message: "hi".into(),
            result: Err("connection refused".into()),
        }),
    );

    assert!(commands.is_empty());
    assert_eq!(
        state.transcript.entries().last(),
        Some(&TranscriptEntry::Assistant(NETWORK_ERROR_TEXT.into()))
    );
}

#[test]
fn blank_chat_message_is_ignored() {
    let mut state = AppState::default();
    assert!(reduce(&mut state, Action::Chat(ChatAction::Send(" ".into()))).is_empty());
    assert!(state.transcript.entries().is_empty());
}

#[test]
fn create_project_uses_buffer_and_refreshes_after() {
    let mut state = AppState::new(Language::C);
    edit(&mut state, "\nint main(void) { return 0; }\n");

    assert!(
        reduce(
            &mut state,
            Action::Project(ProjectAction::Create { name: "  ".into() })
        )
        .is_empty()
    );

    let commands = reduce(
        &mut state,
        Action::Project(ProjectAction::Create {
            name: "demo".into(),
        }),
    );
    assert_eq!(
        commands,
        vec![Command::CreateProject(ProjectDraft {
            name: "demo".into(),
            code: "int main(void) { return 0; }".into(),
            language: Language::C,
        })]
    );

    let commands = reduce(
        &mut state,
        Action::Async(AsyncAction::ProjectMutated {
            reason: ProjectRefreshReason::AfterCreate,
            result: Ok(()),
        }),
    );
    assert!(matches!(
        commands.as_slice(),
        [Command::RefreshProjects {
            reason: ProjectRefreshReason::AfterCreate,
            ..
        }]
    ));
    assert_eq!(
        state.notice.as_ref().map(|n| n.text.as_str()),
        Some("Project saved!")
    );
}

#[test]
fn failed_mutation_still_refreshes() {
    let mut state = AppState::default();
    let commands = reduce(
        &mut state,
        Action::Async(AsyncAction::ProjectMutated {
            reason: ProjectRefreshReason::AfterDelete,
            result: Err("disk full".into()),
        }),
    );
    assert_eq!(commands.len(), 1);
    assert!(state.notice.as_ref().is_some_and(|n| n.is_error));
}

#[test]
fn stale_project_listing_is_dropped() {
    let mut state = AppState::default();
    let first = projects::refresh(&mut state, ProjectRefreshReason::Manual);
    let second = projects::refresh(&mut state, ProjectRefreshReason::AfterDelete);
    let (Command::RefreshProjects { seq: first, .. }, Command::RefreshProjects { seq: second, .. }) =
        (first, second)
    else {
        panic!("expected refresh commands");
    };

    reduce(
        &mut state,
        Action::Async(AsyncAction::ProjectsLoaded {
            seq: second,
            reason: ProjectRefreshReason::AfterDelete,
            result: Ok(vec![project(2, "kept", false)]),
        }),
    );
    reduce(
        &mut state,
        Action::Async(AsyncAction::ProjectsLoaded {
            seq: first,
            reason: ProjectRefreshReason::Manual,
            result: Ok(vec![project(1, "deleted", false), project(2, "kept", false)]),
        }),
    );

    let ids: Vec<_> = state.projects.projects.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2]);
    assert!(!state.projects.is_loading);
}

#[test]
fn toggle_favorite_reads_cached_flag() {
    let mut state = AppState::default();
    state.projects.projects = vec![project(1, "a", false), project(2, "b", true)];

    assert_eq!(
        reduce(
            &mut state,
            Action::Project(ProjectAction::ToggleFavorite { id: 1 })
        ),
        vec![Command::SetFavorite {
            id: 1,
            favorite: true
        }]
    );
    assert_eq!(
        reduce(
            &mut state,
            Action::Project(ProjectAction::ToggleFavorite { id: 2 })
        ),
        vec![Command::SetFavorite {
            id: 2,
            favorite: false
        }]
    );
    assert!(
        reduce(
            &mut state,
            Action::Project(ProjectAction::ToggleFavorite { id: 9 })
        )
        .is_empty()
    );
}

#[test]
fn load_into_editor_uses_cache_and_closes_gate() {
    let mut state = AppState::default();
    edit(&mut state, "int x = ;");
    let request = submit(&mut state);
    finish(&mut state, request, ExplainMode::Analyze, issues_found());
    state.projects.projects = vec![project(4, "server", false)];

    let commands = reduce(
        &mut state,
        Action::Project(ProjectAction::LoadIntoEditor { id: 4 }),
    );

    assert!(commands.is_empty());
    assert_eq!(state.editor.text(), "// server");
    assert_eq!(state.editor.language(), &Language::Go);
    assert!(!state.session.full_fix_enabled());

    let before = state.editor.text().to_string();
    reduce(
        &mut state,
        Action::Project(ProjectAction::LoadIntoEditor { id: 99 }),
    );
    assert_eq!(state.editor.text(), before);
}

#[test]
fn copy_output_requires_content() {
    let mut state = AppState::default();
    let commands = reduce(&mut state, Action::Analysis(AnalysisAction::CopyOutput));
    assert!(commands.is_empty());
    assert_eq!(
        state.notice.as_ref().map(|n| (n.text.as_str(), n.is_error)),
        Some(("Nothing to copy!", true))
    );

    state.output = OutputView::Validation(EMPTY_CODE_MESSAGE.into());
    let commands = reduce(&mut state, Action::Analysis(AnalysisAction::CopyOutput));
    assert_eq!(
        commands,
        vec![Command::CopyToClipboard {
            text: EMPTY_CODE_MESSAGE.into(),
            success: "Output copied!",
        }]
    );
}
