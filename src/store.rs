//! Canonical content ownership and snapshot persistence.
//!
//! [`ContentStore`] owns the committed [`SiteData`] and the single snapshot
//! file it is persisted in. The lifecycle is deliberately small:
//!
//! - [`ContentStore::open`] — read the snapshot, falling back to starter
//!   content when it is missing, unparseable, or from another format version.
//!   The fallback is reported through [`LoadOutcome`] rather than raised; a
//!   broken snapshot must never keep the site from starting.
//! - [`ContentStore::commit`] — replace the committed data and persist it.
//! - [`ContentStore::reset`] — delete the snapshot and restore starter
//!   content. Idempotent; callers confirm before invoking (irreversible).
//!
//! # Commit atomicity
//!
//! The snapshot is written to a temporary file and renamed over the live
//! path, and in-memory data is replaced only after the rename succeeds. A
//! failed persist therefore leaves both memory and disk agreeing on the
//! previous committed state — the store never shows data it could not save.
//!
//! The snapshot is private to a single running instance. Concurrent
//! processes editing the same file may overwrite each other's commits;
//! single-owner use makes that acceptable.

use crate::types::SiteData;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the snapshot file within the storage directory.
pub const SNAPSHOT_FILENAME: &str = "site-data.json";

/// Version of the snapshot format. Bump to retire old snapshots when the
/// data model changes incompatibly.
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk snapshot envelope.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    data: SiteData,
}

/// How the committed data was obtained at startup. The caller decides how to
/// surface it; only the two fallback cases warrant a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Snapshot parsed cleanly.
    Loaded,
    /// No snapshot on disk; starter content in use.
    Missing,
    /// Snapshot present but unreadable or unparseable; starter content in use.
    Corrupt(String),
    /// Snapshot written by a different format version; starter content in use.
    VersionMismatch(u32),
}

impl LoadOutcome {
    /// True when the snapshot was not used and starter content took its place.
    pub fn fell_back(&self) -> bool {
        matches!(self, LoadOutcome::Corrupt(_) | LoadOutcome::VersionMismatch(_))
    }
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadOutcome::Loaded => write!(f, "loaded saved content"),
            LoadOutcome::Missing => write!(f, "no saved content, using starter content"),
            LoadOutcome::Corrupt(detail) => {
                write!(f, "saved content unreadable ({detail}), using starter content")
            }
            LoadOutcome::VersionMismatch(found) => write!(
                f,
                "saved content has format version {found} (expected {SNAPSHOT_VERSION}), \
                 using starter content"
            ),
        }
    }
}

/// Owner of the canonical [`SiteData`] and its persisted snapshot.
#[derive(Debug)]
pub struct ContentStore {
    snapshot_path: PathBuf,
    data: SiteData,
}

impl ContentStore {
    /// Open the store backed by `storage_dir`, loading the snapshot if one
    /// exists. Never fails: every problem with the snapshot falls back to
    /// starter content and is reported in the returned [`LoadOutcome`].
    pub fn open(storage_dir: &Path) -> (Self, LoadOutcome) {
        let snapshot_path = storage_dir.join(SNAPSHOT_FILENAME);
        let (data, outcome) = match std::fs::read_to_string(&snapshot_path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                (SiteData::starter(), LoadOutcome::Missing)
            }
            Err(e) => (SiteData::starter(), LoadOutcome::Corrupt(e.to_string())),
            Ok(content) => match serde_json::from_str::<Snapshot>(&content) {
                Err(e) => (SiteData::starter(), LoadOutcome::Corrupt(e.to_string())),
                Ok(snapshot) if snapshot.version != SNAPSHOT_VERSION => (
                    SiteData::starter(),
                    LoadOutcome::VersionMismatch(snapshot.version),
                ),
                Ok(snapshot) => (snapshot.data, LoadOutcome::Loaded),
            },
        };
        (
            Self {
                snapshot_path,
                data,
            },
            outcome,
        )
    }

    /// The committed data.
    pub fn data(&self) -> &SiteData {
        &self.data
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Replace the committed data with `new_data` and persist it.
    ///
    /// On error the previous committed state remains both in memory and on
    /// disk; `new_data` is discarded.
    pub fn commit(&mut self, new_data: SiteData) -> Result<(), StoreError> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            data: new_data,
        };
        let json = serde_json::to_string_pretty(&snapshot)?;

        if let Some(parent) = self.snapshot_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.snapshot_path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, &self.snapshot_path)?;

        // The snapshot is durably in place; now the new data may become visible.
        self.data = snapshot.data;
        Ok(())
    }

    /// Delete the snapshot and restore starter content.
    ///
    /// Idempotent: a missing snapshot is already the desired end state.
    /// Irreversible — callers must confirm with the user first.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.snapshot_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.data = SiteData::starter();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_data() -> SiteData {
        let mut data = SiteData::starter();
        data.bio = "edited bio".to_string();
        data
    }

    // =========================================================================
    // Open / load fallbacks
    // =========================================================================

    #[test]
    fn open_without_snapshot_uses_starter_content() {
        let tmp = TempDir::new().unwrap();
        let (store, outcome) = ContentStore::open(tmp.path());
        assert_eq!(outcome, LoadOutcome::Missing);
        assert_eq!(*store.data(), SiteData::starter());
    }

    #[test]
    fn open_with_corrupt_snapshot_falls_back_with_diagnostic() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(SNAPSHOT_FILENAME), "not json").unwrap();

        let (store, outcome) = ContentStore::open(tmp.path());
        assert!(outcome.fell_back());
        assert!(matches!(outcome, LoadOutcome::Corrupt(_)));
        assert_eq!(*store.data(), SiteData::starter());
    }

    #[test]
    fn open_with_wrong_version_falls_back() {
        let tmp = TempDir::new().unwrap();
        let json = format!(
            r#"{{"version": {}, "data": {}}}"#,
            SNAPSHOT_VERSION + 1,
            serde_json::to_string(&SiteData::starter()).unwrap()
        );
        fs::write(tmp.path().join(SNAPSHOT_FILENAME), json).unwrap();

        let (store, outcome) = ContentStore::open(tmp.path());
        assert_eq!(outcome, LoadOutcome::VersionMismatch(SNAPSHOT_VERSION + 1));
        assert_eq!(*store.data(), SiteData::starter());
    }

    #[test]
    fn missing_snapshot_is_not_reported_as_fallback() {
        let tmp = TempDir::new().unwrap();
        let (_, outcome) = ContentStore::open(tmp.path());
        assert!(!outcome.fell_back());
    }

    // =========================================================================
    // Commit / reload roundtrip
    // =========================================================================

    #[test]
    fn commit_then_reopen_yields_committed_data() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = ContentStore::open(tmp.path());
        store.commit(sample_data()).unwrap();

        let (reopened, outcome) = ContentStore::open(tmp.path());
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert_eq!(*reopened.data(), sample_data());
    }

    #[test]
    fn commit_replaces_in_memory_data() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = ContentStore::open(tmp.path());
        store.commit(sample_data()).unwrap();
        assert_eq!(store.data().bio, "edited bio");
    }

    #[test]
    fn commit_creates_storage_dir_if_needed() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("state").join("folio");
        let (mut store, _) = ContentStore::open(&nested);
        store.commit(sample_data()).unwrap();
        assert!(nested.join(SNAPSHOT_FILENAME).exists());
    }

    #[test]
    fn commit_leaves_no_temp_file_behind() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = ContentStore::open(tmp.path());
        store.commit(sample_data()).unwrap();

        let names: Vec<String> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![SNAPSHOT_FILENAME.to_string()]);
    }

    // =========================================================================
    // Commit failure keeps previous state visible
    // =========================================================================

    #[test]
    fn failed_commit_preserves_previous_state() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = ContentStore::open(tmp.path());
        store.commit(sample_data()).unwrap();

        // A directory squatting on the snapshot path makes the rename fail.
        fs::remove_file(store.snapshot_path()).unwrap();
        fs::create_dir(store.snapshot_path()).unwrap();

        let mut newer = sample_data();
        newer.bio = "never committed".to_string();
        assert!(store.commit(newer).is_err());
        assert_eq!(store.data().bio, "edited bio");
    }

    // =========================================================================
    // Reset
    // =========================================================================

    #[test]
    fn reset_restores_starter_and_deletes_snapshot() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = ContentStore::open(tmp.path());
        store.commit(sample_data()).unwrap();

        store.reset().unwrap();
        assert_eq!(*store.data(), SiteData::starter());
        assert!(!store.snapshot_path().exists());

        let (reopened, outcome) = ContentStore::open(tmp.path());
        assert_eq!(outcome, LoadOutcome::Missing);
        assert_eq!(*reopened.data(), SiteData::starter());
    }

    #[test]
    fn repeated_reset_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = ContentStore::open(tmp.path());
        store.commit(sample_data()).unwrap();

        store.reset().unwrap();
        store.reset().unwrap();
        assert_eq!(*store.data(), SiteData::starter());
        assert!(!store.snapshot_path().exists());
    }
}
