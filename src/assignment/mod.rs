pub mod bulk;
pub mod distributor;
pub mod mapping;
pub mod queue;

pub use bulk::assign_bulk;
pub use distributor::{distribute, DistributionReport, LeadOutcome, RotationCounter};
pub use mapping::{MappingManager, ServiceMapping};
pub use queue::{ReviewQueue, ReviewState};
