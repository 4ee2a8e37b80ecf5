use std::io::{Cursor, Read};

use thiserror::Error;
use zip::ZipArchive;

use crate::ArchiveEntry;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive cannot be opened: {0}")]
    Corrupt(String),
    #[error("failed to read archive entry {path}: {message}")]
    Entry { path: String, message: String },
}

/// Yields the file entries of a compressed container. Implementations have no
/// notion of folders as a domain concept; grouping happens downstream.
pub trait ArchiveReader: Send + Sync {
    fn read_entries(&self, archive: &[u8]) -> Result<Vec<ArchiveEntry>, ArchiveError>;
}

/// ZIP-format reader. Directory markers are skipped so callers only ever see
/// real file entries.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipArchiveReader;

// The declared entry size comes from the archive headers and is untrusted; a
// tampered record must not drive a huge up-front allocation. Honest entries
// beyond the cap still read fully, `read_to_end` grows as bytes arrive.
const ENTRY_PREALLOC_CAP: usize = 1 << 20;

impl ArchiveReader for ZipArchiveReader {
    fn read_entries(&self, archive: &[u8]) -> Result<Vec<ArchiveEntry>, ArchiveError> {
        let mut zip = ZipArchive::new(Cursor::new(archive))
            .map_err(|err| ArchiveError::Corrupt(err.to_string()))?;

        let mut entries = Vec::with_capacity(zip.len());
        for index in 0..zip.len() {
            let mut file = zip.by_index(index).map_err(|err| ArchiveError::Entry {
                path: format!("#{index}"),
                message: err.to_string(),
            })?;
            if file.is_dir() {
                continue;
            }
            let path = file.name().to_string();
            let prealloc = usize::try_from(file.size())
                .unwrap_or(0)
                .min(ENTRY_PREALLOC_CAP);
            let mut payload = Vec::with_capacity(prealloc);
            file.read_to_end(&mut payload)
                .map_err(|err| ArchiveError::Entry {
                    path: path.clone(),
                    message: err.to_string(),
                })?;
            entries.push(ArchiveEntry {
                path,
                payload: payload.into(),
            });
        }
        Ok(entries)
    }
}
