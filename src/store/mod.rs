//! Contracts for the external collaborators: the remote lead and employee
//! tables and the operator-local key-value storage.
//!
//! The remote stores are consumed over asynchronous request/response calls
//! awaited one at a time; nothing in this crate issues concurrent writes.

pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Employee, EmployeeId, Lead, LeadId};

pub use memory::{MemoryEmployeeStore, MemoryLeadStore, MemoryStorage};

/// Remote table of lead records.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// All leads whose `assigned_to` is currently empty, in store order.
    /// The order is whatever the store returns; callers must not assume
    /// it is stable across calls.
    async fn list_unassigned(&self) -> Result<Vec<Lead>>;

    /// Write `assigned_to = employee` for a single lead.
    ///
    /// The write is compare-and-set on "still unassigned": if another
    /// workflow claimed the lead in the meantime, the store returns
    /// `RouterError::LeadAlreadyAssigned` and leaves the existing
    /// assignment in place.
    async fn assign(&self, lead: LeadId, employee: EmployeeId) -> Result<()>;
}

/// Remote table of employee records.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Employees with status Active and a "Sales" job title.
    async fn list_active_sales(&self) -> Result<Vec<Employee>>;
}

/// Operator-local key-value persistence (one device, one operator).
pub trait LocalStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str);
}
