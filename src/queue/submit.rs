//! Concurrent submission of the selected queue entries.

use chrono::NaiveDate;
use futures::future::join_all;
use serde::Serialize;

use super::PendingQueue;
use crate::error::{Result, SkpError};
use crate::forms::FormKind;
use crate::forms::payload::{Submission, SubmitterIdentity};

/// Destination for creation bodies. The HTTP backend implements this; tests
/// use in-memory fakes.
pub trait SubmissionSink {
    fn submit(&self, submission: &Submission) -> impl Future<Output = Result<()>>;
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryFailure {
    pub id: String,
    pub kind: FormKind,
    pub summary: String,
    pub error: String,
}

/// Outcome of one `submit_selected` call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubmitReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<EntryFailure>,
}

impl SubmitReport {
    #[must_use]
    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

struct Job {
    id: String,
    kind: FormKind,
    summary: String,
    submission: Submission,
}

impl PendingQueue {
    /// Submit every selected entry concurrently and wait for all of them.
    ///
    /// Succeeded entries leave the queue and the selection; failed entries
    /// stay put. An empty selection fails before any request is made.
    pub async fn submit_selected<S: SubmissionSink>(
        &mut self,
        sink: &S,
        identity: &SubmitterIdentity,
        today: NaiveDate,
    ) -> Result<SubmitReport> {
        let jobs: Vec<Job> = self
            .selected()
            .into_iter()
            .map(|entry| Job {
                id: entry.id.clone(),
                kind: entry.kind(),
                summary: entry.summary(),
                submission: Submission::from_payload(&entry.payload, identity, today),
            })
            .collect();
        if jobs.is_empty() {
            return Err(SkpError::NothingSelected);
        }

        tracing::debug!(count = jobs.len(), "submitting selected forms");
        let outcomes = join_all(jobs.iter().map(|job| sink.submit(&job.submission))).await;

        let mut report = SubmitReport::default();
        for (job, outcome) in jobs.into_iter().zip(outcomes) {
            match outcome {
                Ok(()) => {
                    tracing::info!(id = %job.id, kind = %job.kind, "submitted");
                    self.remove(&job.id);
                    report.succeeded.push(job.id);
                }
                Err(err) => {
                    tracing::warn!(id = %job.id, kind = %job.kind, error = %err, "submission failed");
                    report.failed.push(EntryFailure {
                        id: job.id,
                        kind: job.kind,
                        summary: job.summary,
                        error: err.to_string(),
                    });
                }
            }
        }
        Ok(report)
    }
}
