use crate::state::{DownloadRef, SessionState, StepId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub document_name: Option<String>,
    pub archive_name: Option<String>,
    pub steps: Vec<StepRowView>,
    pub current_step: usize,
    pub folders_total: usize,
    pub folders_processed: usize,
    pub result: Option<ResultView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRowView {
    pub id: StepId,
    pub label: &'static str,
    pub progress: u8,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub success: bool,
    pub message: String,
    pub download: Option<DownloadRef>,
}
