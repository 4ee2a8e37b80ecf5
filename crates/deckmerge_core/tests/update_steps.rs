use deckmerge_core::{update, AppState, Msg, StepId, STEP_COUNT};

fn running_state() -> AppState {
    let state = AppState::new();
    let (state, _) = update(state, Msg::DocumentSelected("deck.pptx".to_string()));
    let (state, _) = update(state, Msg::ArchiveSelected("images.zip".to_string()));
    let (state, _) = update(state, Msg::ProcessClicked);
    state
}

#[test]
fn fresh_state_exposes_four_zeroed_steps_in_fixed_order() {
    let mut state = AppState::new();
    let view = state.view();

    assert_eq!(view.steps.len(), STEP_COUNT);
    let ids: Vec<_> = view.steps.iter().map(|s| s.id).collect();
    assert_eq!(
        ids,
        vec![StepId::Extract, StepId::Analyze, StepId::Process, StepId::Complete]
    );
    assert!(view.steps.iter().all(|s| s.progress == 0 && !s.completed));
    assert!(!state.consume_dirty());
}

#[test]
fn step_progress_updates_one_row_and_the_cursor() {
    let mut state = running_state();
    state.consume_dirty();

    let (mut state, effects) = update(
        std::mem::take(&mut state),
        Msg::StepProgress {
            step: 1,
            progress: 100,
            completed: true,
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.steps[1].progress, 100);
    assert!(view.steps[1].completed);
    assert_eq!(view.current_step, 1);
    assert!(view.steps[0].progress == 0, "other rows untouched");
    assert!(state.consume_dirty());
}

#[test]
fn out_of_range_step_index_is_ignored() {
    let state = running_state();
    let before = state.view();

    let (state, effects) = update(
        state,
        Msg::StepProgress {
            step: STEP_COUNT,
            progress: 50,
            completed: false,
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.view().steps, before.steps);
}

#[test]
fn progress_is_clamped_to_100() {
    let state = running_state();

    let (state, _) = update(
        state,
        Msg::StepProgress {
            step: 2,
            progress: 255,
            completed: false,
        },
    );

    assert_eq!(state.view().steps[2].progress, 100);
}

#[test]
fn folder_counts_are_tracked_as_reported() {
    let state = running_state();

    let (state, _) = update(state, Msg::FolderCount { total: 3, processed: 0 });
    let (state, _) = update(state, Msg::FolderCount { total: 3, processed: 2 });

    let view = state.view();
    assert_eq!(view.folders_total, 3);
    assert_eq!(view.folders_processed, 2);
}

#[test]
fn folder_counts_pin_the_cursor_to_the_process_step() {
    let state = running_state();
    let (state, _) = update(
        state,
        Msg::StepProgress {
            step: 1,
            progress: 0,
            completed: false,
        },
    );
    assert_eq!(state.view().current_step, 1);

    let (state, _) = update(state, Msg::FolderCount { total: 3, processed: 0 });

    assert_eq!(state.view().current_step, StepId::Process as usize);
}
