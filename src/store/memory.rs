//! In-memory reference implementations of the store contracts.
//!
//! Used by the integration tests and by embedders that want the assignment
//! workflows without a remote backend. The lead store keeps insertion order
//! so a seeded candidate set is walked deterministically.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, RouterError};
use crate::model::{Employee, EmployeeId, Lead, LeadId};
use crate::store::{EmployeeStore, LeadStore, LocalStorage};

/// In-memory lead table.
#[derive(Debug, Default)]
pub struct MemoryLeadStore {
    leads: RwLock<Vec<Lead>>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, lead: Lead) {
        self.leads.write().await.push(lead);
    }

    pub async fn get(&self, id: LeadId) -> Option<Lead> {
        self.leads.read().await.iter().find(|l| l.id == id).cloned()
    }

    pub async fn all(&self) -> Vec<Lead> {
        self.leads.read().await.clone()
    }
}

#[async_trait]
impl LeadStore for MemoryLeadStore {
    async fn list_unassigned(&self) -> Result<Vec<Lead>> {
        let leads = self.leads.read().await;
        Ok(leads.iter().filter(|l| l.is_unassigned()).cloned().collect())
    }

    async fn assign(&self, lead: LeadId, employee: EmployeeId) -> Result<()> {
        let mut leads = self.leads.write().await;
        let record = leads
            .iter_mut()
            .find(|l| l.id == lead)
            .ok_or(RouterError::LeadNotFound(lead))?;
        if !record.is_unassigned() {
            return Err(RouterError::LeadAlreadyAssigned(lead));
        }
        record.assigned_to = Some(employee);
        Ok(())
    }
}

/// In-memory employee table.
#[derive(Debug, Default)]
pub struct MemoryEmployeeStore {
    employees: RwLock<Vec<Employee>>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, employee: Employee) {
        self.employees.write().await.push(employee);
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn list_active_sales(&self) -> Result<Vec<Employee>> {
        let employees = self.employees.read().await;
        Ok(employees.iter().filter(|e| e.is_eligible()).cloned().collect())
    }
}

/// In-memory key-value storage standing in for the operator's local store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().expect("storage lock poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .expect("storage lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.values.lock().expect("storage lock poisoned").remove(key);
    }
}
