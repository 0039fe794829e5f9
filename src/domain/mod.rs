// ==========================================
// Maintenance KPI Engine - Domain Layer
// ==========================================

pub mod event;
pub mod types;

pub use event::{MaintenanceEvent, RawEventRecord};
pub use types::{EventStatus, MaintenanceType, WeekKey};
