//! Edit session.
//!
//! At most one record is edited at a time. The session holds a scratch copy
//! of the record until it is committed or discarded. Besides the row's
//! position in the sorted view it remembers the record's id and the batch
//! it came from, so a commit can never land on a different record.

use tracing::debug;

use crate::Result;
use crate::field::Field;
use crate::record::{Entry, Record, RecordId};

#[derive(Debug, Clone)]
struct ActiveEdit {
    index: usize,
    id: RecordId,
    generation: u64,
    scratch: Record,
}

/// A finished edit, ready to be written back to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedEdit {
    /// Position of the record in the sorted view when the edit began.
    pub index: usize,
    pub id: RecordId,
    pub generation: u64,
    pub record: Record,
}

/// Transient scratch state for the record being edited.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    active: Option<ActiveEdit>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `entry`, found at `index` in the sorted view.
    ///
    /// An edit already in progress is discarded without committing.
    pub fn begin(&mut self, index: usize, entry: &Entry, generation: u64) {
        if let Some(previous) = self.active.take() {
            debug!(index = previous.index, "discarding unsaved edit");
        }
        self.active = Some(ActiveEdit {
            index,
            id: entry.id,
            generation,
            scratch: entry.record.clone(),
        });
    }

    /// Set one scratch field from text.
    ///
    /// Returns `Ok(false)` without doing anything if no edit is active.
    pub fn update(&mut self, field: Field, value: &str) -> Result<bool> {
        match self.active.as_mut() {
            Some(active) => {
                active.scratch.set_text(field, value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Finish the edit and hand back the scratch record.
    ///
    /// Returns `None` if no edit is active.
    pub fn commit(&mut self) -> Option<CommittedEdit> {
        self.active.take().map(|active| CommittedEdit {
            index: active.index,
            id: active.id,
            generation: active.generation,
            record: active.scratch,
        })
    }

    /// Drop the edit without committing. Returns true if one was active.
    pub fn cancel(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Sorted-view position of the record being edited.
    pub fn active_index(&self) -> Option<usize> {
        self.active.as_ref().map(|a| a.index)
    }

    pub fn active_id(&self) -> Option<RecordId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// The scratch copy being edited.
    pub fn scratch(&self) -> Option<&Record> {
        self.active.as_ref().map(|a| &a.scratch)
    }
}
