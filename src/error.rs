use chrono::NaiveDate;
use thiserror::Error;

use crate::model::LeadId;

#[derive(Error, Debug)]
pub enum RouterError {
    #[error("No assignment configuration saved for {0}")]
    ConfigurationMissing(NaiveDate),

    #[error("Local storage write failed: {0}")]
    StorageWriteFailure(String),

    #[error("Lead already assigned: {0}")]
    LeadAlreadyAssigned(LeadId),

    #[error("Lead not found: {0}")]
    LeadNotFound(LeadId),

    #[error("Remote write failed for lead {lead_id}: {reason}")]
    RemoteWrite { lead_id: LeadId, reason: String },

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, RouterError>;
