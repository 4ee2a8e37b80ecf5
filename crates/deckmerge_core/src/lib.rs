//! Deckmerge core: pure state machine and view-model helpers for the
//! caller-side display state.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, DownloadRef, ProcessingStep, RunOutcome, SessionState, StepId, STEP_COUNT,
};
pub use update::update;
pub use view_model::{AppViewModel, ResultView, StepRowView};
