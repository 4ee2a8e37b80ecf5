use deckmerge_core::{
    update, AppState, DownloadRef, Effect, Msg, SessionState, StepId,
};

fn select_both(state: AppState) -> AppState {
    let (state, _) = update(state, Msg::DocumentSelected("deck.pptx".to_string()));
    let (state, _) = update(state, Msg::ArchiveSelected("images.zip".to_string()));
    state
}

fn finished_download() -> DownloadRef {
    DownloadRef {
        url: "blob:deckmerge/1-deadbeef".to_string(),
        filename: "deck_processing_report.txt".to_string(),
    }
}

#[test]
fn process_click_without_both_files_is_a_noop() {
    let state = AppState::new();
    let (state, effects) = update(state, Msg::ProcessClicked);
    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Idle);

    let (state, _) = update(state, Msg::DocumentSelected("deck.pptx".to_string()));
    let (state, effects) = update(state, Msg::ProcessClicked);
    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Idle);
}

#[test]
fn process_click_with_both_files_starts_a_run() {
    let state = select_both(AppState::new());

    let (state, effects) = update(state, Msg::ProcessClicked);

    assert_eq!(effects, vec![Effect::StartProcessing]);
    assert_eq!(state.session(), SessionState::Running);
}

#[test]
fn process_click_while_running_is_ignored() {
    let state = select_both(AppState::new());
    let (state, _) = update(state, Msg::ProcessClicked);

    let (state, effects) = update(state, Msg::ProcessClicked);

    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Running);
}

#[test]
fn finished_result_is_recorded_and_displayed() {
    let state = select_both(AppState::new());
    let (state, _) = update(state, Msg::ProcessClicked);

    let (state, effects) = update(
        state,
        Msg::ProcessingFinished {
            success: true,
            message: "2 folders processed successfully".to_string(),
            download: Some(finished_download()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Finished);
    let result = state.view().result.expect("result view");
    assert!(result.success);
    assert_eq!(result.message, "2 folders processed successfully");
    assert_eq!(
        result.download.expect("download").filename,
        "deck_processing_report.txt"
    );
}

#[test]
fn resubmission_after_a_finished_run_releases_stale_downloads_first() {
    let state = select_both(AppState::new());
    let (state, _) = update(state, Msg::ProcessClicked);
    let (state, _) = update(
        state,
        Msg::ProcessingFinished {
            success: true,
            message: "1 folders processed successfully".to_string(),
            download: Some(finished_download()),
        },
    );

    let (state, effects) = update(state, Msg::ProcessClicked);

    assert_eq!(
        effects,
        vec![Effect::ReleaseDownloads, Effect::StartProcessing]
    );
    let view = state.view();
    assert!(view.result.is_none(), "previous result cleared");
    assert!(view.steps.iter().all(|s| s.progress == 0 && !s.completed));
    assert_eq!(view.folders_total, 0);
}

#[test]
fn reset_restores_the_initial_form_and_releases_downloads() {
    let state = select_both(AppState::new());
    let (state, _) = update(state, Msg::ProcessClicked);
    let (state, _) = update(
        state,
        Msg::StepProgress {
            step: StepId::Process as usize,
            progress: 60,
            completed: false,
        },
    );
    let (state, _) = update(
        state,
        Msg::ProcessingFinished {
            success: false,
            message: "no image folders found in the archive".to_string(),
            download: None,
        },
    );

    let (mut state, effects) = update(state, Msg::ResetClicked);

    assert_eq!(effects, vec![Effect::ReleaseDownloads]);
    let view = state.view();
    assert_eq!(view.session, SessionState::Idle);
    assert!(view.document_name.is_none());
    assert!(view.archive_name.is_none());
    assert!(view.result.is_none());
    assert!(view.steps.iter().all(|s| s.progress == 0 && !s.completed));
    assert_eq!(view.current_step, 0);
    assert!(state.consume_dirty());
}
