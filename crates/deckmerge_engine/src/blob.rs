use std::collections::HashMap;
use std::sync::Mutex;

use bytes::Bytes;
use sha2::{Digest, Sha256};

/// Session-scoped store of named in-memory blobs.
///
/// Stands in for browser object URLs: each stored payload gets an addressable
/// URI usable for preview or download until it is explicitly revoked. The
/// engine never revokes on its own; releasing stale references on reset or
/// resubmission is the caller's responsibility.
#[derive(Debug, Default)]
pub struct BlobStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_seq: u64,
    blobs: HashMap<String, Bytes>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `content` and returns its URI. Identical payloads still get
    /// distinct URIs so each reference can be revoked individually.
    pub fn create(&self, content: Bytes) -> String {
        let mut inner = self.inner.lock().expect("blob store lock");
        inner.next_seq += 1;
        let url = format!("blob:deckmerge/{}-{}", inner.next_seq, short_hash(&content));
        inner.blobs.insert(url.clone(), content);
        url
    }

    pub fn get(&self, url: &str) -> Option<Bytes> {
        self.inner
            .lock()
            .expect("blob store lock")
            .blobs
            .get(url)
            .cloned()
    }

    /// Releases one reference. Returns whether the URI was live.
    pub fn revoke(&self, url: &str) -> bool {
        self.inner
            .lock()
            .expect("blob store lock")
            .blobs
            .remove(url)
            .is_some()
    }

    /// Releases every reference owned by the session.
    pub fn revoke_all(&self) {
        self.inner.lock().expect("blob store lock").blobs.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("blob store lock").blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn short_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
