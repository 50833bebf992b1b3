use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque lead identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeadId(pub Uuid);

impl LeadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LeadId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LeadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque employee identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(pub Uuid);

impl EmployeeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmployeeStatus::Active => write!(f, "active"),
            EmployeeStatus::Inactive => write!(f, "inactive"),
        }
    }
}

/// A sales prospect record routed to an employee.
///
/// `service_category` is a free-text label and may be empty. A lead with
/// `assigned_to == None` is unassigned; an empty category is still a valid
/// category key as far as the distributor is concerned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub service_category: String,
    pub assigned_to: Option<EmployeeId>,
    /// Creation timestamp; only used for oldest-first ordering in the
    /// review queue. Leads imported without one sort first.
    pub created_at: Option<DateTime<Utc>>,
}

impl Lead {
    pub fn new(service_category: impl Into<String>) -> Self {
        Self {
            id: LeadId::new(),
            service_category: service_category.into(),
            assigned_to: None,
            created_at: Some(Utc::now()),
        }
    }

    pub fn with_id(id: LeadId, service_category: impl Into<String>) -> Self {
        Self {
            id,
            service_category: service_category.into(),
            assigned_to: None,
            created_at: Some(Utc::now()),
        }
    }

    pub fn is_unassigned(&self) -> bool {
        self.assigned_to.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub full_name: String,
    /// Free text; candidate lists are built from a "Sales" substring match.
    pub job_title: String,
    pub status: EmployeeStatus,
}

impl Employee {
    pub fn new(full_name: impl Into<String>, job_title: impl Into<String>) -> Self {
        Self {
            id: EmployeeId::new(),
            full_name: full_name.into(),
            job_title: job_title.into(),
            status: EmployeeStatus::Active,
        }
    }

    /// Eligible for assignment: currently active and on a sales title.
    pub fn is_eligible(&self) -> bool {
        self.status == EmployeeStatus::Active && self.job_title.contains("Sales")
    }
}
