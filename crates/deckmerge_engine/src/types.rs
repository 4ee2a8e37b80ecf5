use bytes::Bytes;

use crate::archive::ArchiveError;

pub type JobId = u64;

/// The four fixed pipeline phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Extract,
    Analyze,
    Process,
    Complete,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Extract, Phase::Analyze, Phase::Process, Phase::Complete];

    /// Stable step index (0..=3) as exposed over the progress boundary.
    pub fn index(self) -> usize {
        match self {
            Phase::Extract => 0,
            Phase::Analyze => 1,
            Phase::Process => 2,
            Phase::Complete => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Extract => "extracting images from archive",
            Phase::Analyze => "analyzing image folders",
            Phase::Process => "processing slide deck",
            Phase::Complete => "finalizing and preparing download",
        }
    }
}

/// An opaque binary file handle as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub content: Bytes,
}

impl InputFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// One archive member: forward-slash internal path plus its raw payload.
/// Directory markers are filtered out before this type reaches callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub payload: Bytes,
}

/// A single image pulled out of the archive. `access_url` is an ephemeral
/// blob-store URI owned by the current session; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub content: Bytes,
    pub access_url: String,
}

/// A top-level archive path segment and its images in first-seen order.
/// Never materialized empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFolder {
    pub name: String,
    pub images: Vec<ImageFile>,
}

/// Tagged progress event emitted over the presentation boundary.
///
/// `StepProgress` fires at least at the start and end of every phase;
/// `FolderCount` fires once at analyze-start and once per folder during the
/// process phase. Consumers must not assume a fixed call count beyond that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    StepProgress {
        job_id: JobId,
        phase: Phase,
        percent: u8,
        completed: bool,
    },
    FolderCount {
        job_id: JobId,
        total: usize,
        processed: usize,
    },
    Finished {
        job_id: JobId,
        result: ProcessingResult,
    },
}

/// Download reference for the generated report artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDownload {
    pub url: String,
    pub filename: String,
}

/// Terminal outcome of one `process_files` invocation; never mutated after
/// return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingResult {
    pub success: bool,
    pub message: String,
    pub download: Option<ReportDownload>,
}

impl ProcessingResult {
    pub fn success(message: impl Into<String>, download: ReportDownload) -> Self {
        Self {
            success: true,
            message: message.into(),
            download: Some(download),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            download: None,
        }
    }
}

/// Failures that can abort the pipeline. All of them are converted into a
/// failed `ProcessingResult` at the orchestrator boundary; nothing propagates
/// to the caller as an unhandled fault.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("{0}")]
    Archive(#[from] ArchiveError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
