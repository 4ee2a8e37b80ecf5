#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Submit the currently selected document and archive to the engine.
    StartProcessing,
    /// Revoke the session's ephemeral download references. Emitted on reset
    /// and on resubmission after a finished run so stale references never
    /// accumulate.
    ReleaseDownloads,
}
