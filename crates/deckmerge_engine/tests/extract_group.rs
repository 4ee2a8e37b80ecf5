use std::io::{Cursor, Write};

use deckmerge_engine::{
    group_image_folders, is_image_path, ArchiveError, ArchiveReader, BlobStore, ZipArchiveReader,
};
use pretty_assertions::assert_eq;
use zip::write::SimpleFileOptions;

fn build_zip(dirs: &[&str], files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for dir in dirs {
        writer.add_directory(*dir, options).expect("add directory");
    }
    for (path, payload) in files {
        writer.start_file(*path, options).expect("start file");
        writer.write_all(payload).expect("write payload");
    }
    writer.finish().expect("finish zip").into_inner()
}

#[test]
fn reader_yields_file_entries_and_skips_directory_markers() {
    let bytes = build_zip(
        &["a", "empty"],
        &[("a/1.png", b"one"), ("loose.png", b"loose")],
    );

    let entries = ZipArchiveReader.read_entries(&bytes).expect("read entries");
    let paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();

    assert_eq!(paths, vec!["a/1.png", "loose.png"]);
    assert_eq!(entries[0].payload.as_ref(), b"one");
}

#[test]
fn reader_survives_a_lying_size_header() {
    let mut bytes = build_zip(&[], &[("a/1.png", b"tiny")]);

    // Inflate the uncompressed-size field of the central directory record
    // (offset 24 past the "PK\x01\x02" signature) to a multi-gigabyte claim.
    // The entry must still read at its true size instead of the declared one.
    let record = bytes
        .windows(4)
        .position(|w| w == b"PK\x01\x02")
        .expect("central directory record");
    bytes[record + 24..record + 28].copy_from_slice(&0x7fff_ffffu32.to_le_bytes());

    let entries = ZipArchiveReader.read_entries(&bytes).expect("read entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, "a/1.png");
    assert_eq!(entries[0].payload.as_ref(), b"tiny");
}

#[test]
fn reader_rejects_corrupt_container() {
    let err = ZipArchiveReader
        .read_entries(b"this is not a zip archive")
        .expect_err("corrupt archive must not open");
    assert!(matches!(err, ArchiveError::Corrupt(_)));
}

#[test]
fn grouping_splits_by_top_level_segment_and_drops_loose_files() {
    let bytes = build_zip(
        &[],
        &[
            ("a/1.png", b"p1"),
            ("a/2.jpg", b"p2"),
            ("b/x.gif", b"p3"),
            ("loose.png", b"p4"),
            ("a/readme.txt", b"not an image"),
        ],
    );
    let entries = ZipArchiveReader.read_entries(&bytes).expect("read entries");
    let blobs = BlobStore::new();

    let folders = group_image_folders(entries, &blobs);

    assert_eq!(folders.len(), 2);
    assert_eq!(folders[0].name, "a");
    let names: Vec<_> = folders[0].images.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["1.png", "2.jpg"]);
    assert_eq!(folders[1].name, "b");
    assert_eq!(folders[1].images.len(), 1);
    assert_eq!(folders[1].images[0].name, "x.gif");
    // One blob reference per accepted image.
    assert_eq!(blobs.len(), 3);
}

#[test]
fn grouping_keeps_first_encounter_folder_order() {
    let bytes = build_zip(
        &[],
        &[
            ("zeta/1.png", b"1"),
            ("alpha/2.png", b"2"),
            ("zeta/3.png", b"3"),
        ],
    );
    let entries = ZipArchiveReader.read_entries(&bytes).expect("read entries");

    let folders = group_image_folders(entries, &BlobStore::new());
    let order: Vec<_> = folders.iter().map(|f| f.name.as_str()).collect();

    assert_eq!(order, vec!["zeta", "alpha"]);
    assert_eq!(folders[0].images.len(), 2);
}

#[test]
fn extension_matching_is_case_insensitive() {
    assert!(is_image_path("FOO/IMG.PNG"));
    assert!(is_image_path("foo/photo.WebP"));
    assert!(!is_image_path("foo/notes.TXT"));

    let bytes = build_zip(&[], &[("FOO/IMG.PNG", b"upper")]);
    let entries = ZipArchiveReader.read_entries(&bytes).expect("read entries");
    let folders = group_image_folders(entries, &BlobStore::new());

    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].name, "FOO");
    assert_eq!(folders[0].images[0].name, "IMG.PNG");
}

#[test]
fn nested_paths_group_under_the_top_segment_with_the_final_name() {
    let bytes = build_zip(&[], &[("a/sub/deep.png", b"deep")]);
    let entries = ZipArchiveReader.read_entries(&bytes).expect("read entries");

    let folders = group_image_folders(entries, &BlobStore::new());

    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].name, "a");
    assert_eq!(folders[0].images[0].name, "deep.png");
}

#[test]
fn image_payloads_are_resolvable_through_their_access_urls() {
    let bytes = build_zip(&[], &[("a/1.png", b"payload")]);
    let entries = ZipArchiveReader.read_entries(&bytes).expect("read entries");
    let blobs = BlobStore::new();

    let folders = group_image_folders(entries, &blobs);
    let image = &folders[0].images[0];

    let stored = blobs.get(&image.access_url).expect("image blob is live");
    assert_eq!(stored, image.content);
}
