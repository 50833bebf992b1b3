//! One-lead-at-a-time manual review workflow.
//!
//! An operator opens the queue, sees the oldest unassigned lead first, and
//! either assigns it, skips past it, or closes the workflow. Skipped leads
//! stay in the queue behind the cursor; closing discards the remaining
//! queue without writing anything.

use crate::error::Result;
use crate::model::{EmployeeId, Lead};
use crate::store::LeadStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    /// Queue not built yet, or discarded.
    Idle,
    /// Lead at `index` is the one currently shown.
    Reviewing { index: usize },
    /// Queue exhausted: everything was assigned or skipped.
    Empty,
}

#[derive(Debug, Default)]
pub struct ReviewQueue {
    leads: Vec<Lead>,
    state: ReviewState,
}

impl Default for ReviewState {
    fn default() -> Self {
        ReviewState::Idle
    }
}

impl ReviewQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    /// Leads not yet reviewed or assigned, including skipped ones.
    pub fn remaining(&self) -> usize {
        self.leads.len()
    }

    /// The lead currently shown to the operator.
    pub fn current(&self) -> Option<&Lead> {
        match self.state {
            ReviewState::Reviewing { index } => self.leads.get(index),
            _ => None,
        }
    }

    /// Build the queue from all unassigned leads, oldest first. Leads with
    /// no creation timestamp sort first, treated as earliest.
    pub async fn open(&mut self, store: &dyn LeadStore) -> Result<()> {
        let mut leads = store.list_unassigned().await?;
        leads.sort_by_key(|l| l.created_at);
        self.state = if leads.is_empty() {
            ReviewState::Empty
        } else {
            ReviewState::Reviewing { index: 0 }
        };
        tracing::debug!(queued = leads.len(), "Review queue opened");
        self.leads = leads;
        Ok(())
    }

    /// Assign the current lead and remove it from the queue.
    ///
    /// The index does not advance; the next lead shifts into the current
    /// position. On a write failure the error is returned and the lead
    /// stays at the current position so the operator can retry.
    pub async fn assign(&mut self, store: &dyn LeadStore, employee: EmployeeId) -> Result<()> {
        let ReviewState::Reviewing { index } = self.state else {
            tracing::warn!("assign called with no lead under review");
            return Ok(());
        };
        let lead_id = self.leads[index].id;

        store.assign(lead_id, employee).await?;

        self.leads.remove(index);
        if index >= self.leads.len() {
            self.state = ReviewState::Empty;
        }
        Ok(())
    }

    /// Advance past the current lead without writing.
    pub fn skip(&mut self) {
        if let ReviewState::Reviewing { index } = self.state {
            if index + 1 < self.leads.len() {
                self.state = ReviewState::Reviewing { index: index + 1 };
            } else {
                self.state = ReviewState::Empty;
            }
        }
    }

    /// Abandon the workflow, discarding the remaining queue. No writes
    /// happen for un-reviewed leads.
    pub fn close(&mut self) {
        self.leads.clear();
        self.state = ReviewState::Idle;
    }
}
