use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use deckmerge_core::{DownloadRef, Effect, Msg};
use deckmerge_engine::{EngineHandle, InputFile, PipelineEvent, PipelineSettings};
use engine_logging::{engine_info, engine_warn};

/// Bridges core effects to the engine and engine events back to core `Msg`s.
pub struct EffectRunner {
    engine: EngineHandle,
    document: InputFile,
    archive: InputFile,
    next_job_id: std::cell::Cell<u64>,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>, document: InputFile, archive: InputFile) -> Self {
        let engine = EngineHandle::new(PipelineSettings::default());
        let runner = Self {
            engine,
            document,
            archive,
            next_job_id: std::cell::Cell::new(0),
        };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartProcessing => {
                    let job_id = self.next_job_id.get() + 1;
                    self.next_job_id.set(job_id);
                    engine_info!(
                        "submitting job {job_id}: document={} archive={}",
                        self.document.name,
                        self.archive.name
                    );
                    self.engine
                        .process(job_id, self.document.clone(), self.archive.clone());
                }
                Effect::ReleaseDownloads => {
                    self.engine.blob_store().revoke_all();
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                let msg = match event {
                    PipelineEvent::StepProgress {
                        phase,
                        percent,
                        completed,
                        ..
                    } => Msg::StepProgress {
                        step: phase.index(),
                        progress: percent,
                        completed,
                    },
                    PipelineEvent::FolderCount {
                        total, processed, ..
                    } => Msg::FolderCount { total, processed },
                    PipelineEvent::Finished { job_id, result } => {
                        if !result.success {
                            engine_warn!("job {job_id} failed: {}", result.message);
                        }
                        Msg::ProcessingFinished {
                            success: result.success,
                            message: result.message,
                            download: result.download.map(|d| DownloadRef {
                                url: d.url,
                                filename: d.filename,
                            }),
                        }
                    }
                };
                if msg_tx.send(msg).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}
