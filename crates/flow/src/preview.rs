//! Local preview references for staged media.
//!
//! A preview lets the host play back a selected file without uploading it.
//! References are move-only: revoking one consumes it, so the same
//! reference cannot be released twice.

use std::collections::HashMap;
use std::fmt;

use authnlens_core::UploadFile;
use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

const URL_PREFIX: &str = "blob:authnlens/";

/// A live, revocable handle on a staged file's content.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PreviewRef {
    id: Uuid,
}

impl PreviewRef {
    /// URL the host resolves through [`PreviewRegistry::resolve`].
    pub fn url(&self) -> String {
        format!("{URL_PREFIX}{}", self.id)
    }
}

impl fmt::Display for PreviewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

#[derive(Debug, Default)]
struct Entries {
    live: HashMap<Uuid, UploadFile>,
    created: u64,
    released: u64,
}

/// Issues and releases preview references. The only place previews are
/// created or destroyed.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    entries: Mutex<Entries>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a preview for a staged file.
    pub fn create(&self, file: &UploadFile) -> PreviewRef {
        let id = Uuid::new_v4();
        let mut entries = self.entries.lock();
        entries.live.insert(id, file.clone());
        entries.created += 1;
        debug!(preview = %id, file_name = %file.name, "created preview");
        PreviewRef { id }
    }

    /// Release a preview. Returns `false` if it was not live, which only
    /// happens when a reference from another registry is passed in.
    pub fn revoke(&self, preview: PreviewRef) -> bool {
        let mut entries = self.entries.lock();
        if entries.live.remove(&preview.id).is_some() {
            entries.released += 1;
            debug!(preview = %preview.id, "revoked preview");
            true
        } else {
            false
        }
    }

    /// Look up the content behind a preview URL.
    pub fn resolve(&self, url: &str) -> Option<UploadFile> {
        let id = Uuid::parse_str(url.strip_prefix(URL_PREFIX)?).ok()?;
        self.entries.lock().live.get(&id).cloned()
    }

    pub fn is_live(&self, preview: &PreviewRef) -> bool {
        self.entries.lock().live.contains_key(&preview.id)
    }

    pub fn live_count(&self) -> usize {
        self.entries.lock().live.len()
    }

    /// Number of previews ever created.
    pub fn created(&self) -> u64 {
        self.entries.lock().created
    }

    /// Number of previews ever released.
    pub fn released(&self) -> u64 {
        self.entries.lock().released
    }
}
