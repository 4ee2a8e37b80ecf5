use crate::view_model::{AppViewModel, ResultView, StepRowView};

/// Exactly four display steps exist, in fixed order.
pub const STEP_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepId {
    Extract,
    Analyze,
    Process,
    Complete,
}

impl StepId {
    pub const ALL: [StepId; STEP_COUNT] =
        [StepId::Extract, StepId::Analyze, StepId::Process, StepId::Complete];

    pub fn label(self) -> &'static str {
        match self {
            StepId::Extract => "extract images from the archive",
            StepId::Analyze => "analyze image folders",
            StepId::Process => "process slide deck",
            StepId::Complete => "finalize and prepare download",
        }
    }
}

/// One row of the step list shown while a run is in flight. Mutated only by
/// progress messages coming back over the engine boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingStep {
    pub id: StepId,
    pub completed: bool,
    pub progress: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    Finished,
}

/// Ephemeral download reference handed back by the engine on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRef {
    pub url: String,
    pub filename: String,
}

/// Terminal outcome of the last run, as displayed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub success: bool,
    pub message: String,
    pub download: Option<DownloadRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    session: SessionState,
    document_name: Option<String>,
    archive_name: Option<String>,
    steps: [ProcessingStep; STEP_COUNT],
    current_step: usize,
    folders_total: usize,
    folders_processed: usize,
    result: Option<RunOutcome>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: SessionState::Idle,
            document_name: None,
            archive_name: None,
            steps: fresh_steps(),
            current_step: 0,
            folders_total: 0,
            folders_processed: 0,
            result: None,
            dirty: false,
        }
    }
}

fn fresh_steps() -> [ProcessingStep; STEP_COUNT] {
    StepId::ALL.map(|id| ProcessingStep {
        id,
        completed: false,
        progress: 0,
    })
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session,
            document_name: self.document_name.clone(),
            archive_name: self.archive_name.clone(),
            steps: self
                .steps
                .iter()
                .map(|step| StepRowView {
                    id: step.id,
                    label: step.id.label(),
                    progress: step.progress,
                    completed: step.completed,
                })
                .collect(),
            current_step: self.current_step,
            folders_total: self.folders_total,
            folders_processed: self.folders_processed,
            result: self.result.as_ref().map(|outcome| ResultView {
                success: outcome.success,
                message: outcome.message.clone(),
                download: outcome.download.clone(),
            }),
            dirty: self.dirty,
        }
    }

    /// Returns and clears the dirty flag so the host can coalesce redraws.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub(crate) fn set_document_name(&mut self, name: String) {
        self.document_name = Some(name);
        self.dirty = true;
    }

    pub(crate) fn set_archive_name(&mut self, name: String) {
        self.archive_name = Some(name);
        self.dirty = true;
    }

    /// A run may start only with both files selected and no run in flight.
    pub(crate) fn can_submit(&self) -> bool {
        self.document_name.is_some()
            && self.archive_name.is_some()
            && self.session != SessionState::Running
    }

    /// Whether a previous run left a terminal result (and therefore possibly
    /// stale download references) behind.
    pub(crate) fn has_finished_run(&self) -> bool {
        self.result.is_some()
    }

    pub(crate) fn begin_run(&mut self) {
        self.session = SessionState::Running;
        self.steps = fresh_steps();
        self.current_step = 0;
        self.folders_total = 0;
        self.folders_processed = 0;
        self.result = None;
        self.dirty = true;
    }

    pub(crate) fn apply_step_progress(&mut self, step: usize, progress: u8, completed: bool) {
        let Some(row) = self.steps.get_mut(step) else {
            return;
        };
        row.progress = progress.min(100);
        row.completed = completed;
        self.current_step = step;
        self.dirty = true;
    }

    pub(crate) fn apply_folder_count(&mut self, total: usize, processed: usize) {
        self.folders_total = total;
        self.folders_processed = processed;
        // The folder counters belong to the per-folder work display, so the
        // cursor pins to the process step whenever counts arrive.
        self.current_step = StepId::Process as usize;
        self.dirty = true;
    }

    pub(crate) fn apply_finished(&mut self, outcome: RunOutcome) {
        self.session = SessionState::Finished;
        self.result = Some(outcome);
        self.dirty = true;
    }

    /// Restores the initial form state. Blob release is signalled separately
    /// as an effect; nothing here survives the reset.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
        self.dirty = true;
    }
}
