//! Pending-forms queue.
//!
//! Drafts wait here, newest first, until the user submits a selection.
//! The queue and its selection set live only as long as the owning
//! session; nothing is written to disk.

pub mod submit;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::{Rng, TryRngCore};
use serde::Serialize;

use crate::error::Result;
use crate::forms::{FormKind, PendingPayload};

pub use submit::{EntryFailure, SubmissionSink, SubmitReport};

/// A validated draft awaiting submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingForm {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: PendingPayload,
}

impl PendingForm {
    #[must_use]
    pub const fn kind(&self) -> FormKind {
        self.payload.kind()
    }

    #[must_use]
    pub fn summary(&self) -> String {
        self.payload.summary()
    }
}

#[derive(Debug, Default)]
pub struct PendingQueue {
    entries: Vec<PendingForm>,
    selected: HashSet<String>,
}

impl PendingQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and enqueue a draft at the head, selecting it.
    ///
    /// Returns the new entry's id.
    pub fn add(&mut self, payload: PendingPayload) -> Result<String> {
        payload.validate()?;

        let mut id = generate_id();
        while self.contains(&id) {
            id = generate_id();
        }

        tracing::debug!(id = %id, kind = %payload.kind(), "queued draft");
        self.entries.insert(
            0,
            PendingForm {
                id: id.clone(),
                created_at: Utc::now(),
                payload,
            },
        );
        self.selected.insert(id.clone());
        Ok(id)
    }

    /// Drop an entry and its selection. Unknown ids are ignored.
    pub fn remove(&mut self, id: &str) -> Option<PendingForm> {
        self.selected.remove(id);
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Check or uncheck an entry. Checking an id that is not queued is a no-op.
    pub fn toggle_select(&mut self, id: &str, checked: bool) {
        if !checked {
            self.selected.remove(id);
        } else if self.contains(id) {
            self.selected.insert(id.to_string());
        } else {
            tracing::debug!(id, "ignoring selection of unknown entry");
        }
    }

    /// Empty the queue and selection. Callers confirm with the user first.
    pub fn clear_all(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.selected.clear();
        removed
    }

    #[must_use]
    pub fn entries(&self) -> &[PendingForm] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PendingForm> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Selected entries in queue order.
    #[must_use]
    pub fn selected(&self) -> Vec<&PendingForm> {
        self.entries
            .iter()
            .filter(|entry| self.selected.contains(&entry.id))
            .collect()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A UUID v4 from the OS random source, or a timestamp-based id when the
/// source is unavailable.
fn generate_id() -> String {
    let mut bytes = [0u8; 16];
    match rand::rngs::OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string(),
        Err(err) => {
            tracing::debug!(error = %err, "OS random source unavailable, using fallback id");
            format!(
                "id-{}-{}",
                Utc::now().timestamp_millis(),
                rand::rng().random_range(0..10_000)
            )
        }
    }
}
