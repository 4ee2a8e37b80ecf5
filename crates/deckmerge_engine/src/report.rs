use std::fmt::Write;

use crate::ImageFolder;

/// Fixed marker appended to the derived output file name.
pub const REPORT_MARKER: &str = "processing_report";

/// Derived output file name: original name with a case-insensitive `.pptx`
/// suffix stripped, then `_{REPORT_MARKER}.txt`.
pub fn report_filename(document_name: &str) -> String {
    let base = strip_document_suffix(document_name);
    format!("{base}_{REPORT_MARKER}.txt")
}

fn strip_document_suffix(name: &str) -> &str {
    let lower = name.to_ascii_lowercase();
    match lower.strip_suffix(".pptx") {
        // `.pptx` is pure ASCII, so the byte length carries over to `name`.
        Some(stripped) => &name[..stripped.len()],
        None => name,
    }
}

/// Builds the textual grouping report.
///
/// Deterministic given identical folders and a fixed `processed_utc`; the
/// timestamp is injected rather than read from a clock so callers can freeze
/// it.
pub fn build_processing_report(
    document_name: &str,
    folders: &[ImageFolder],
    processed_utc: &str,
) -> String {
    let mut report = String::new();
    report.push_str("=== Slide Deck Processing Report ===\n\n");
    let _ = writeln!(report, "Original file: {document_name}");
    let _ = writeln!(report, "Processed at: {processed_utc}");
    let _ = writeln!(report, "Folders processed: {}", folders.len());
    report.push('\n');

    report.push_str("=== Folder Details ===\n\n");
    for (index, folder) in folders.iter().enumerate() {
        let _ = writeln!(report, "{}. Folder: {}", index + 1, folder.name);
        let _ = writeln!(report, "   Images: {}", folder.images.len());
        report.push_str("   Image names:\n");
        for image in &folder.images {
            let _ = writeln!(report, "     - {}", image.name);
        }
        report.push('\n');
    }

    report.push_str("=== Notes ===\n");
    report.push_str("- all images were extracted from the archive\n");
    report.push_str("- all folders were analyzed and their images classified\n");
    report.push_str("- the slide deck itself was carried through unmodified\n");
    report
}
