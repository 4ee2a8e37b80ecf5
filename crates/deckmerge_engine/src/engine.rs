use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use crate::blob::BlobStore;
use crate::pipeline::{ChannelProgressSink, FileProcessor, Pipeline, PipelineSettings};
use crate::{InputFile, JobId, PipelineEvent};

enum EngineCommand {
    Process {
        job_id: JobId,
        document: InputFile,
        archive: InputFile,
    },
}

/// Handle to the background processing engine.
///
/// Commands run on a dedicated thread with a current-thread tokio runtime,
/// one at a time, so a submission's extract/analyze/process/complete sequence
/// never interleaves with another. Events are drained with `try_recv`.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<PipelineEvent>>>,
    blobs: Arc<BlobStore>,
}

impl EngineHandle {
    pub fn new(settings: PipelineSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let pipeline = Arc::new(Pipeline::new(settings));
        let blobs = pipeline.blob_store();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                runtime.block_on(handle_command(pipeline.as_ref(), command, &event_tx));
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
            blobs,
        }
    }

    /// Enqueues one document + archive submission.
    pub fn process(&self, job_id: JobId, document: InputFile, archive: InputFile) {
        let _ = self.cmd_tx.send(EngineCommand::Process {
            job_id,
            document,
            archive,
        });
    }

    pub fn try_recv(&self) -> Option<PipelineEvent> {
        self.event_rx.lock().expect("event receiver lock").try_recv().ok()
    }

    /// Session blob store for resolving and revoking download references.
    pub fn blob_store(&self) -> Arc<BlobStore> {
        self.blobs.clone()
    }
}

async fn handle_command(
    processor: &dyn FileProcessor,
    command: EngineCommand,
    event_tx: &mpsc::Sender<PipelineEvent>,
) {
    match command {
        EngineCommand::Process {
            job_id,
            document,
            archive,
        } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = processor
                .process_files(job_id, &document, &archive, &sink)
                .await;
            let _ = event_tx.send(PipelineEvent::Finished { job_id, result });
        }
    }
}
