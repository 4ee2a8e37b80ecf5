use crate::{AppState, Effect, Msg, RunOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DocumentSelected(name) => {
            state.set_document_name(name);
            Vec::new()
        }
        Msg::ArchiveSelected(name) => {
            state.set_archive_name(name);
            Vec::new()
        }
        Msg::ProcessClicked => {
            if !state.can_submit() {
                return (state, Vec::new());
            }
            let release_stale = state.has_finished_run();
            state.begin_run();
            let mut effects = Vec::with_capacity(1 + usize::from(release_stale));
            if release_stale {
                effects.push(Effect::ReleaseDownloads);
            }
            effects.push(Effect::StartProcessing);
            effects
        }
        Msg::StepProgress {
            step,
            progress,
            completed,
        } => {
            state.apply_step_progress(step, progress, completed);
            Vec::new()
        }
        Msg::FolderCount { total, processed } => {
            state.apply_folder_count(total, processed);
            Vec::new()
        }
        Msg::ProcessingFinished {
            success,
            message,
            download,
        } => {
            state.apply_finished(RunOutcome {
                success,
                message,
                download,
            });
            Vec::new()
        }
        Msg::ResetClicked => {
            state.reset();
            vec![Effect::ReleaseDownloads]
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
