//! One-shot distribution of an explicit lead selection across an explicit
//! employee selection.
//!
//! Unlike the batch distributor this rotates with a single shared counter
//! over the whole selection, ignoring service categories: lead `i` goes to
//! `employees[i % employees.len()]`.

use crate::assignment::distributor::{DistributionReport, LeadOutcome};
use crate::model::{EmployeeId, LeadId};
use crate::store::LeadStore;

/// Spread the selected leads across the selected employees round-robin.
///
/// A no-op when either selection is empty (the call site disables the
/// action). Writes are sequential and independent; a failed write leaves
/// earlier assignments in place and later ones still happen. `on_complete`
/// runs exactly once after every write was attempted, not after each one.
pub async fn assign_bulk<F>(
    store: &dyn LeadStore,
    lead_ids: &[LeadId],
    employee_ids: &[EmployeeId],
    on_complete: F,
) -> DistributionReport
where
    F: FnOnce(),
{
    let mut report = DistributionReport::default();
    if lead_ids.is_empty() || employee_ids.is_empty() {
        return report;
    }

    for (i, lead) in lead_ids.iter().enumerate() {
        let employee = employee_ids[i % employee_ids.len()];
        let outcome = match store.assign(*lead, employee).await {
            Ok(()) => {
                tracing::info!(lead_id = %lead, employee_id = %employee, "Lead bulk-assigned");
                LeadOutcome::Assigned {
                    lead: *lead,
                    employee,
                }
            }
            Err(error) => {
                tracing::warn!(lead_id = %lead, %error, "Bulk assignment write failed");
                LeadOutcome::Failed {
                    lead: *lead,
                    reason: error.to_string(),
                }
            }
        };
        report.outcomes.push(outcome);
    }

    tracing::info!(
        assigned = report.assigned_count(),
        failed = report.failed_count(),
        "Bulk assignment complete"
    );
    on_complete();
    report
}
