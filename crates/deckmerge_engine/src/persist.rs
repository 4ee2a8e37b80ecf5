use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::blob::BlobStore;
use crate::ReportDownload;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("report directory unavailable: {0}")]
    ReportDir(String),
    #[error("download reference is no longer live: {0}")]
    StaleDownload(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Materializes report downloads in one output directory.
///
/// Reports land under their derived `<base>_<marker>.txt` names. Each write
/// goes through a temp file and a rename, so an interrupted run never leaves
/// a half-written report behind, and re-processing the same document replaces
/// the previous report file.
pub struct ReportSink {
    dir: PathBuf,
}

impl ReportSink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Resolves `download` through the session store and writes its body.
    /// A revoked reference is a `StaleDownload` error, not a panic; the
    /// caller decides whether to re-run the pipeline.
    pub fn save_download(
        &self,
        store: &BlobStore,
        download: &ReportDownload,
    ) -> Result<PathBuf, PersistError> {
        let body = store
            .get(&download.url)
            .ok_or_else(|| PersistError::StaleDownload(download.url.clone()))?;
        self.save(&download.filename, &body)
    }

    /// Atomically writes one report body under `filename`.
    pub fn save(&self, filename: &str, body: &[u8]) -> Result<PathBuf, PersistError> {
        self.ensure_dir()?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(body)?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }

    fn ensure_dir(&self) -> Result<(), PersistError> {
        if self.dir.exists() {
            if !self.dir.is_dir() {
                return Err(PersistError::ReportDir(format!(
                    "{} is not a directory",
                    self.dir.display()
                )));
            }
            return Ok(());
        }
        fs::create_dir_all(&self.dir).map_err(|e| PersistError::ReportDir(e.to_string()))
    }
}
