//! Batch round-robin distribution of unassigned leads.
//!
//! One run: load the day's service mapping, fetch the unassigned leads in
//! store order, rotate through each category's employee list with a modulo
//! cursor, and write the assignments back one lead at a time. The rotation
//! cursor lives only for the run; every run starts over at index 0.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::assignment::mapping::{stored_mapping, ServiceMapping};
use crate::error::{Result, RouterError};
use crate::model::{EmployeeId, LeadId};
use crate::store::{EmployeeStore, LeadStore, LocalStorage};

/// Per-category modulo cursor for one distribution run.
#[derive(Debug, Default)]
pub struct RotationCounter {
    cursors: HashMap<String, usize>,
}

impl RotationCounter {
    /// Cursor at 0 for every category present in the mapping.
    pub fn for_mapping(mapping: &ServiceMapping) -> Self {
        let cursors = mapping.categories().map(|c| (c.clone(), 0)).collect();
        Self { cursors }
    }

    /// Current cursor for the category, advancing it modulo `len`.
    /// An unseen category starts at 0.
    ///
    /// `len` is the rotation list length and must be nonzero; an empty
    /// list has no rotation position to hand out, and callers skip the
    /// lead instead of asking for one.
    pub fn next(&mut self, category: &str, len: usize) -> usize {
        debug_assert!(len > 0, "rotation over an empty employee list");
        let cursor = self.cursors.entry(category.to_string()).or_insert(0);
        let position = *cursor;
        *cursor = (position + 1) % len;
        position
    }
}

/// Outcome for a single lead within a batch operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadOutcome {
    Assigned { lead: LeadId, employee: EmployeeId },
    /// No employee configured for the lead's category; a normal condition,
    /// not a failure.
    Skipped { lead: LeadId, category: String },
    Failed { lead: LeadId, reason: String },
}

impl LeadOutcome {
    pub fn lead(&self) -> LeadId {
        match self {
            LeadOutcome::Assigned { lead, .. }
            | LeadOutcome::Skipped { lead, .. }
            | LeadOutcome::Failed { lead, .. } => *lead,
        }
    }
}

/// Per-lead outcomes of a batch run plus aggregate counts.
#[derive(Debug, Default)]
pub struct DistributionReport {
    pub outcomes: Vec<LeadOutcome>,
}

impl DistributionReport {
    pub fn assigned_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, LeadOutcome::Assigned { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, LeadOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, LeadOutcome::Failed { .. }))
            .count()
    }

    pub fn failed_leads(&self) -> Vec<LeadId> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                LeadOutcome::Failed { lead, .. } => Some(*lead),
                _ => None,
            })
            .collect()
    }
}

enum Decision {
    Assign { lead: LeadId, employee: EmployeeId },
    Skip { lead: LeadId, category: String },
}

/// Run one distribution pass over all currently-unassigned leads.
///
/// Fails fast with `ConfigurationMissing` before any write when no mapping
/// is stored for `as_of`, or the stored one has no categories. Configured employees that are no longer active
/// Sales staff are dropped from their rotation list for the run, so a
/// stale mapping never routes a lead to an ineligible employee. Per-lead
/// write failures are isolated: they are logged, counted in the report,
/// and never abort or roll back the rest of the batch.
pub async fn distribute(
    leads: &dyn LeadStore,
    employees: &dyn EmployeeStore,
    storage: &dyn LocalStorage,
    as_of: NaiveDate,
) -> Result<DistributionReport> {
    let mapping = stored_mapping(storage, as_of)
        .ok_or(RouterError::ConfigurationMissing(as_of))?;
    // A saved-but-empty mapping (zero categories) is the same operator
    // mistake as never saving one; checked before the eligibility filter
    // so a filter-emptied mapping still runs (and skips).
    if mapping.is_empty() {
        return Err(RouterError::ConfigurationMissing(as_of));
    }

    let eligible: std::collections::HashSet<EmployeeId> = employees
        .list_active_sales()
        .await?
        .into_iter()
        .map(|e| e.id)
        .collect();
    let mapping = mapping.retain_eligible(|id| eligible.contains(id));

    let candidates = leads.list_unassigned().await?;
    let mut counter = RotationCounter::for_mapping(&mapping);

    // Decide every assignment before touching the store, in candidate order.
    let decisions: Vec<Decision> = candidates
        .iter()
        .map(|lead| {
            let rotation = mapping
                .employees_for(&lead.service_category)
                .filter(|list| !list.is_empty());
            match rotation {
                Some(list) => {
                    let cursor = counter.next(&lead.service_category, list.len());
                    Decision::Assign {
                        lead: lead.id,
                        employee: list[cursor],
                    }
                }
                None => Decision::Skip {
                    lead: lead.id,
                    category: lead.service_category.clone(),
                },
            }
        })
        .collect();

    // Apply the pending assignments, one independent write per lead.
    let mut report = DistributionReport::default();
    for decision in decisions {
        let outcome = match decision {
            Decision::Skip { lead, category } => {
                tracing::debug!(lead_id = %lead, category = %category, "No employees configured, lead skipped");
                LeadOutcome::Skipped { lead, category }
            }
            Decision::Assign { lead, employee } => match leads.assign(lead, employee).await {
                Ok(()) => {
                    tracing::info!(lead_id = %lead, employee_id = %employee, "Lead assigned");
                    LeadOutcome::Assigned { lead, employee }
                }
                Err(error) => {
                    tracing::warn!(lead_id = %lead, %error, "Lead assignment write failed");
                    LeadOutcome::Failed {
                        lead,
                        reason: error.to_string(),
                    }
                }
            },
        };
        report.outcomes.push(outcome);
    }

    tracing::info!(
        as_of = %as_of,
        assigned = report.assigned_count(),
        skipped = report.skipped_count(),
        failed = report.failed_count(),
        "Distribution run complete"
    );
    Ok(report)
}
