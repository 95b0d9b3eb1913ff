//! Source fingerprinting for incremental-rebuild detection.
//!
//! A fingerprint records enough about the TOC source to tell whether the
//! persistent search index is still current: a content digest of the TOC
//! bytes, the help root's last-modified timestamp, and the schema version
//! the index was built against. It is stored alongside the index as a single
//! JSON sidecar file, written atomically last so a crash mid-rebuild leaves
//! the stale fingerprint in place and is retried on next startup.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::IndexError;

/// Bumped whenever the Tantivy schema (see `schema.rs`) changes shape.
pub const SCHEMA_VERSION: u32 = 1;

const FINGERPRINT_FILE: &str = "fingerprint.json";

/// Recorded state of the TOC source at the time the index was last built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Schema version the index was built against.
    pub schema_version: u32,
    /// Hex-encoded SHA-256 digest of the TOC XML bytes.
    pub source_digest: String,
    /// Last-modified timestamp of the help root, Unix seconds.
    pub source_mtime: i64,
    /// When the index was built, Unix seconds.
    pub built_at: i64,
}

impl Fingerprint {
    /// Computes the fingerprint for a TOC file's bytes and its containing help root.
    pub fn compute(toc_bytes: &[u8], help_root: &Path) -> io::Result<Self> {
        let mut hasher = Sha256::new();
        hasher.update(toc_bytes);
        let source_digest = format!("{:x}", hasher.finalize());

        let source_mtime = fs::metadata(help_root)?
            .modified()
            .unwrap_or(UNIX_EPOCH)
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            source_digest,
            source_mtime,
            built_at: now_unix(),
        })
    }

    /// Reads a previously stored fingerprint from an index directory, if any.
    pub fn read(index_dir: &Path) -> Option<Self> {
        let bytes = fs::read(index_dir.join(FINGERPRINT_FILE)).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Writes this fingerprint into an index directory, creating it if needed.
    ///
    /// Callers write this only after every other part of a rebuild has
    /// succeeded, so a crash mid-rebuild is detected (the old or absent
    /// fingerprint won't match) and retried on the next startup.
    pub fn write(&self, index_dir: &Path) -> Result<(), IndexError> {
        fs::create_dir_all(index_dir)?;
        let bytes = serde_json::to_vec_pretty(self).expect("Fingerprint serializes");
        fs::write(index_dir.join(FINGERPRINT_FILE), bytes)?;
        Ok(())
    }

    /// True iff `self` reflects the same source state as `other` — same
    /// schema version and the same digest (the mtime is informational only;
    /// a byte-identical TOC with a touched mtime should not force a rebuild).
    pub fn matches(&self, other: &Self) -> bool {
        self.schema_version == other.schema_version && self.source_digest == other.source_digest
    }
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::TempDir;

    #[test]
    fn compute_is_stable_for_same_bytes() {
        let temp = TempDir::new().unwrap();
        let fp1 = Fingerprint::compute(b"<BrHelpContent/>", temp.path()).unwrap();
        let fp2 = Fingerprint::compute(b"<BrHelpContent/>", temp.path()).unwrap();
        assert!(fp1.matches(&fp2));
    }

    #[test]
    fn different_bytes_do_not_match() {
        let temp = TempDir::new().unwrap();
        let fp1 = Fingerprint::compute(b"<BrHelpContent/>", temp.path()).unwrap();
        let fp2 = Fingerprint::compute(b"<BrHelpContent/><!-- modified -->", temp.path()).unwrap();
        assert!(!fp1.matches(&fp2));
    }

    #[test]
    fn round_trips_through_disk() {
        let temp = TempDir::new().unwrap();
        let index_dir = temp.path().join("index");
        let fp = Fingerprint::compute(b"<BrHelpContent/>", temp.path()).unwrap();
        fp.write(&index_dir).unwrap();

        let read_back = Fingerprint::read(&index_dir).unwrap();
        assert_eq!(fp, read_back);
    }

    #[test]
    fn missing_fingerprint_reads_as_none() {
        let temp = TempDir::new().unwrap();
        assert!(Fingerprint::read(temp.path()).is_none());
    }

    #[test]
    fn schema_version_mismatch_does_not_match() {
        let temp = TempDir::new().unwrap();
        let mut fp = Fingerprint::compute(b"data", temp.path()).unwrap();
        let fp2 = fp.clone();
        fp.schema_version += 1;
        assert!(!fp.matches(&fp2));
    }

    #[test]
    fn stale_directory_does_not_panic_on_unreadable_json() {
        let temp = TempDir::new().unwrap();
        let index_dir = temp.path().join("index");
        stdfs::create_dir_all(&index_dir).unwrap();
        stdfs::write(index_dir.join(FINGERPRINT_FILE), b"not json").unwrap();
        assert!(Fingerprint::read(&index_dir).is_none());
    }
}
