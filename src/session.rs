//! The editing workflow's working copy.
//!
//! An [`EditSession`] opens on a clone of the committed [`SiteData`] and owns
//! it exclusively: mutations never alias the store's data, and the store sees
//! nothing until [`EditSession::commit`]. [`EditSession::cancel`] discards
//! the copy.
//!
//! Both `commit` and `cancel` consume the session, so mutating a closed
//! session is unreachable by construction. A commit whose persistence fails
//! hands the session back in [`CommitFailed`] so the edits survive for a
//! retry; the store keeps showing the previous committed state either way.
//!
//! Each session carries a process-unique generation token. Background image
//! ingestion captures the token at submission and checks it at completion
//! (see [`crate::ingest`]), so work finishing after the session was
//! committed, cancelled, or superseded is discarded instead of mutating data
//! that is no longer live. Only one session is meant to be open at a time;
//! opening another one supersedes the first.

use crate::store::{ContentStore, StoreError};
use crate::types::{CareerField, SiteData, WorkField, WorkItem};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("career index {index} out of bounds ({len} items)")]
    CareerIndexOutOfBounds { index: usize, len: usize },
    #[error("work index {index} out of bounds ({len} items)")]
    WorkIndexOutOfBounds { index: usize, len: usize },
}

/// A commit whose snapshot write failed. The store still shows the previous
/// committed state; the session comes back unchanged for a retry.
#[derive(Error, Debug)]
#[error("commit failed: {error}")]
pub struct CommitFailed {
    pub session: EditSession,
    pub error: StoreError,
}

/// Exclusively-owned working copy of [`SiteData`].
#[derive(Debug)]
pub struct EditSession {
    data: SiteData,
    generation: u64,
    next_work_id: u64,
}

impl EditSession {
    /// Open a session on an independent copy of `current`.
    pub fn open(current: &SiteData) -> Self {
        // Seeding above the largest persisted id keeps new ids distinct
        // across commits, not just within this session.
        let next_work_id = current.works.iter().map(|w| w.id).max().map_or(1, |m| m + 1);
        Self {
            data: current.clone(),
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            next_work_id,
        }
    }

    /// The current working value.
    pub fn data(&self) -> &SiteData {
        &self.data
    }

    /// Token identifying this session for background completions.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_profile_image(&mut self, value: &str) {
        self.data.profile_img = value.to_string();
    }

    pub fn set_bio(&mut self, value: &str) {
        self.data.bio = value.to_string();
    }

    pub fn update_career_item(
        &mut self,
        index: usize,
        field: CareerField,
        value: &str,
    ) -> Result<(), SessionError> {
        let len = self.data.career.len();
        let item = self
            .data
            .career
            .get_mut(index)
            .ok_or(SessionError::CareerIndexOutOfBounds { index, len })?;
        match field {
            CareerField::Date => item.date = value.to_string(),
            CareerField::Title => item.title = value.to_string(),
            CareerField::Role => item.role = value.to_string(),
        }
        Ok(())
    }

    pub fn update_work_field(
        &mut self,
        index: usize,
        field: WorkField,
        value: &str,
    ) -> Result<(), SessionError> {
        let len = self.data.works.len();
        let work = self
            .data
            .works
            .get_mut(index)
            .ok_or(SessionError::WorkIndexOutOfBounds { index, len })?;
        match field {
            WorkField::Title => work.title = value.to_string(),
            WorkField::Img => work.img = value.to_string(),
            WorkField::Url => work.url = value.to_string(),
        }
        Ok(())
    }

    /// Append an empty work entry and return its id. Ids are monotonic and
    /// never reused within the session.
    pub fn add_work(&mut self) -> u64 {
        let id = self.next_work_id;
        self.next_work_id += 1;
        self.data.works.push(WorkItem {
            id,
            title: String::new(),
            img: String::new(),
            url: String::new(),
        });
        id
    }

    /// Remove exactly one work entry. Remaining entries keep their ids and
    /// relative order; an out-of-bounds index changes nothing.
    pub fn remove_work(&mut self, index: usize) -> Result<WorkItem, SessionError> {
        let len = self.data.works.len();
        if index >= len {
            return Err(SessionError::WorkIndexOutOfBounds { index, len });
        }
        Ok(self.data.works.remove(index))
    }

    /// Commit the working value into the store and close the session.
    pub fn commit(self, store: &mut ContentStore) -> Result<(), CommitFailed> {
        match store.commit(self.data.clone()) {
            Ok(()) => Ok(()),
            Err(error) => Err(CommitFailed {
                session: self,
                error,
            }),
        }
    }

    /// Discard the working value and close the session. The store is left
    /// untouched.
    pub fn cancel(self) {}
}
