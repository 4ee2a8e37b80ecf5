//! Deckmerge engine: archive ingestion and staged processing pipeline.
mod archive;
mod blob;
mod engine;
mod group;
mod persist;
mod pipeline;
mod report;
mod types;

pub use archive::{ArchiveError, ArchiveReader, ZipArchiveReader};
pub use blob::BlobStore;
pub use engine::EngineHandle;
pub use group::{group_image_folders, is_image_path, IMAGE_EXTENSIONS};
pub use persist::{PersistError, ReportSink};
pub use pipeline::{
    ChannelProgressSink, FileProcessor, Pipeline, PipelineSettings, ProgressSink,
};
pub use report::{build_processing_report, report_filename, REPORT_MARKER};
pub use types::{
    ArchiveEntry, ImageFile, ImageFolder, InputFile, JobId, Phase, PipelineEvent, ProcessError,
    ProcessingResult, ReportDownload,
};
