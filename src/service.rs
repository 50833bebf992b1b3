//! Root object bundling the stores and exposing the three assignment
//! workflows. UI event handlers call into this; nothing here spawns
//! background work.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::assignment::bulk::assign_bulk;
use crate::assignment::distributor::{distribute, DistributionReport};
use crate::assignment::mapping::MappingManager;
use crate::assignment::queue::ReviewQueue;
use crate::error::Result;
use crate::model::{EmployeeId, LeadId};
use crate::store::{EmployeeStore, LeadStore, LocalStorage};

pub struct AssignmentService {
    leads: Arc<dyn LeadStore>,
    employees: Arc<dyn EmployeeStore>,
    storage: Arc<dyn LocalStorage>,
    /// The calendar day the service mapping is keyed on. Injected rather
    /// than read from the clock so date-rollover behavior is testable.
    as_of: NaiveDate,
}

impl AssignmentService {
    pub fn new(
        leads: Arc<dyn LeadStore>,
        employees: Arc<dyn EmployeeStore>,
        storage: Arc<dyn LocalStorage>,
        as_of: NaiveDate,
    ) -> Self {
        Self {
            leads,
            employees,
            storage,
            as_of,
        }
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn lead_store(&self) -> &Arc<dyn LeadStore> {
        &self.leads
    }

    pub fn employee_store(&self) -> &Arc<dyn EmployeeStore> {
        &self.employees
    }

    /// A manager for editing today's service mapping.
    pub fn mapping_manager(&self) -> MappingManager {
        MappingManager::new(self.storage.clone(), self.as_of)
    }

    /// Run one automatic round-robin pass over all unassigned leads.
    pub async fn run_distributor(&self) -> Result<DistributionReport> {
        distribute(
            self.leads.as_ref(),
            self.employees.as_ref(),
            self.storage.as_ref(),
            self.as_of,
        )
        .await
    }

    /// Open the manual review queue over the current unassigned leads.
    pub async fn open_review_queue(&self) -> Result<ReviewQueue> {
        let mut queue = ReviewQueue::new();
        queue.open(self.leads.as_ref()).await?;
        Ok(queue)
    }

    /// Spread an explicit lead selection across an explicit employee
    /// selection; `on_complete` runs once after all writes were attempted.
    pub async fn assign_bulk<F>(
        &self,
        lead_ids: &[LeadId],
        employee_ids: &[EmployeeId],
        on_complete: F,
    ) -> DistributionReport
    where
        F: FnOnce(),
    {
        assign_bulk(self.leads.as_ref(), lead_ids, employee_ids, on_complete).await
    }
}
