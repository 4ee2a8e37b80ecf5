use std::sync::{mpsc, Arc};
use std::time::Duration;

use engine_logging::{engine_debug, engine_error, engine_info};

use crate::archive::{ArchiveReader, ZipArchiveReader};
use crate::blob::BlobStore;
use crate::group::group_image_folders;
use crate::report::{build_processing_report, report_filename};
use crate::{
    ImageFolder, InputFile, JobId, Phase, PipelineEvent, ProcessError, ProcessingResult,
    ReportDownload,
};

#[derive(Clone)]
pub struct PipelineSettings {
    /// Settling interval after reporting folder totals in the analyze phase.
    pub analyze_delay: Duration,
    /// Pacing delay per folder in the process phase. The process phase does
    /// not mutate the document; it simulates per-folder work while keeping
    /// the progress-reporting contract.
    pub per_folder_delay: Duration,
    /// Clock for the report timestamp; injectable so tests can freeze it.
    pub processed_utc: Arc<dyn Fn() -> String + Send + Sync>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            analyze_delay: Duration::from_millis(1000),
            per_folder_delay: Duration::from_millis(800),
            processed_utc: Arc::new(|| chrono::Utc::now().to_rfc3339()),
        }
    }
}

impl std::fmt::Debug for PipelineSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineSettings")
            .field("analyze_delay", &self.analyze_delay)
            .field("per_folder_delay", &self.per_folder_delay)
            .finish_non_exhaustive()
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: PipelineEvent);
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<PipelineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<PipelineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: PipelineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait FileProcessor: Send + Sync {
    async fn process_files(
        &self,
        job_id: JobId,
        document: &InputFile,
        archive: &InputFile,
        sink: &dyn ProgressSink,
    ) -> ProcessingResult;
}

/// Four-phase stage orchestrator: extract, analyze, process, complete.
///
/// Phases are sequential, non-skippable, and non-reentrant within one
/// invocation; pacing delays are cooperative suspension points. The pipeline
/// holds no state across invocations besides the session blob store.
pub struct Pipeline {
    settings: PipelineSettings,
    reader: Box<dyn ArchiveReader>,
    blobs: Arc<BlobStore>,
}

impl Pipeline {
    pub fn new(settings: PipelineSettings) -> Self {
        Self::with_reader(settings, Box::new(ZipArchiveReader))
    }

    pub fn with_reader(settings: PipelineSettings, reader: Box<dyn ArchiveReader>) -> Self {
        Self {
            settings,
            reader,
            blobs: Arc::new(BlobStore::new()),
        }
    }

    /// The session store owning image and report blobs created by this
    /// pipeline. Revoking stale references is the caller's responsibility.
    pub fn blob_store(&self) -> Arc<BlobStore> {
        self.blobs.clone()
    }

    async fn run(
        &self,
        job_id: JobId,
        document: &InputFile,
        archive: &InputFile,
        sink: &dyn ProgressSink,
    ) -> Result<ProcessingResult, ProcessError> {
        // Phase 1: extract image folders from the archive.
        self.emit_step(sink, job_id, Phase::Extract, 0, false);
        let entries = self.reader.read_entries(&archive.content)?;
        let folders = group_image_folders(entries, &self.blobs);
        self.emit_step(sink, job_id, Phase::Extract, 100, true);

        if folders.is_empty() {
            engine_info!("job {job_id}: archive {} has no image folders", archive.name);
            return Ok(ProcessingResult::failure(
                "no image folders found in the archive",
            ));
        }
        let total = folders.len();
        engine_info!("job {job_id}: extracted {total} image folders from {}", archive.name);

        // Phase 2: analyze the folder totals, then settle.
        self.emit_step(sink, job_id, Phase::Analyze, 0, false);
        sink.emit(PipelineEvent::FolderCount {
            job_id,
            total,
            processed: 0,
        });
        tokio::time::sleep(self.settings.analyze_delay).await;
        self.emit_step(sink, job_id, Phase::Analyze, 100, true);

        // Phase 3: walk the folders in order. Placeholder pass: the document
        // is not mutated, only per-folder progress is reported.
        self.emit_step(sink, job_id, Phase::Process, 0, false);
        for (index, folder) in folders.iter().enumerate() {
            let processed = index + 1;
            sink.emit(PipelineEvent::FolderCount {
                job_id,
                total,
                processed,
            });
            let percent = ((processed * 100) / total) as u8;
            self.emit_step(sink, job_id, Phase::Process, percent, false);
            engine_debug!(
                "job {job_id}: folder {}/{total} {:?} ({} images)",
                processed,
                folder.name,
                folder.images.len()
            );
            tokio::time::sleep(self.settings.per_folder_delay).await;
        }
        self.emit_step(sink, job_id, Phase::Process, 100, true);

        // Phase 4: generate the report and hand back a download reference.
        self.emit_step(sink, job_id, Phase::Complete, 0, false);
        let download = self.generate_report(&document.name, &folders);
        self.emit_step(sink, job_id, Phase::Complete, 100, true);

        Ok(ProcessingResult::success(
            format!("{total} folders processed successfully"),
            download,
        ))
    }

    fn generate_report(&self, document_name: &str, folders: &[ImageFolder]) -> ReportDownload {
        let processed_utc = (self.settings.processed_utc)();
        let body = build_processing_report(document_name, folders, &processed_utc);
        let url = self.blobs.create(body.into_bytes().into());
        ReportDownload {
            url,
            filename: report_filename(document_name),
        }
    }

    fn emit_step(
        &self,
        sink: &dyn ProgressSink,
        job_id: JobId,
        phase: Phase,
        percent: u8,
        completed: bool,
    ) {
        sink.emit(PipelineEvent::StepProgress {
            job_id,
            phase,
            percent,
            completed,
        });
    }
}

#[async_trait::async_trait]
impl FileProcessor for Pipeline {
    /// Runs the four phases and converts any failure into a terminal
    /// `ProcessingResult`; nothing propagates to the caller as an unhandled
    /// fault, and no retry is attempted.
    async fn process_files(
        &self,
        job_id: JobId,
        document: &InputFile,
        archive: &InputFile,
        sink: &dyn ProgressSink,
    ) -> ProcessingResult {
        match self.run(job_id, document, archive, sink).await {
            Ok(result) => result,
            Err(err) => {
                engine_error!("job {job_id} failed: {err}");
                ProcessingResult::failure(format!("processing error: {err}"))
            }
        }
    }
}
