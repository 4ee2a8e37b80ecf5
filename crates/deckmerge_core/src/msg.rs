use crate::state::DownloadRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked the slide-deck document; only the name is held here.
    DocumentSelected(String),
    /// User picked the image archive; only the name is held here.
    ArchiveSelected(String),
    /// User submitted the two files for processing.
    ProcessClicked,
    /// Engine step progress for the run in flight.
    StepProgress {
        step: usize,
        progress: u8,
        completed: bool,
    },
    /// Engine folder totals for the run in flight.
    FolderCount { total: usize, processed: usize },
    /// Engine terminal result for the run in flight.
    ProcessingFinished {
        success: bool,
        message: String,
        download: Option<DownloadRef>,
    },
    /// User cleared the form.
    ResetClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
