use std::collections::HashMap;

use crate::blob::BlobStore;
use crate::{ArchiveEntry, ImageFile, ImageFolder};

/// Recognized image extensions, matched case-insensitively against the final
/// path segment.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Whether a path's extension is in the recognized image set.
pub fn is_image_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// Groups archive entries into folder-keyed image collections.
///
/// Entries without a path separator (loose top-level files) and entries whose
/// extension is not a recognized image type are dropped. The folder key is the
/// first path segment and the image name the final one. Folders are emitted in
/// first-encounter order, images in traversal order within each folder, and a
/// blob-store URI is created per accepted image. An archive with zero
/// qualifying entries yields an empty vec; the orchestrator treats that as a
/// distinct failure, not vacuous success.
pub fn group_image_folders(
    entries: impl IntoIterator<Item = ArchiveEntry>,
    blobs: &BlobStore,
) -> Vec<ImageFolder> {
    let mut folders: Vec<ImageFolder> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        if !is_image_path(&entry.path) {
            continue;
        }
        let mut segments = entry.path.split('/');
        let Some(folder_name) = segments.next() else {
            continue;
        };
        let Some(file_name) = segments.next_back() else {
            // No separator: a loose file at the archive root, not inside a folder.
            continue;
        };
        if folder_name.is_empty() || file_name.is_empty() {
            continue;
        }

        let access_url = blobs.create(entry.payload.clone());
        let image = ImageFile {
            name: file_name.to_string(),
            content: entry.payload,
            access_url,
        };

        match index_by_name.get(folder_name) {
            Some(&index) => folders[index].images.push(image),
            None => {
                index_by_name.insert(folder_name.to_string(), folders.len());
                folders.push(ImageFolder {
                    name: folder_name.to_string(),
                    images: vec![image],
                });
            }
        }
    }

    folders
}
