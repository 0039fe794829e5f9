// ==========================================
// Maintenance KPI Engine - Core Library
// ==========================================
// Reliability and availability indicators over maintenance-event
// records: normalization, filtering, global and emergency-corrective
// KPI sets, ISO-week aggregation.
// The presentation layer and the remote data connector are external
// collaborators; this crate is a deterministic, stateless batch
// transform over an in-memory record set.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - records & types
pub mod domain;

// Importer layer - raw rows to canonical records
pub mod importer;

// Engine layer - KPI computation
pub mod engine;

// Data source layer - snapshot loading
pub mod source;

// Configuration
pub mod config;

// Logging
pub mod logging;

// ==========================================
// Core type re-exports
// ==========================================

// Domain types
pub use domain::{EventStatus, MaintenanceEvent, MaintenanceType, RawEventRecord, WeekKey};

// Importer
pub use importer::{DerivationService, FieldMapper, ImportError, ImportResult, RecordNormalizer};

// Engines
pub use engine::{
    BreakdownRow, EventFilter, FilterEngine, MetricsCalculator, PlantMetrics, RankedCount,
    ReliabilityCalculator, ReliabilityMetrics, SummaryEngine, TypeShare, WeeklyAggregator,
    WeeklyEmergency, WeeklyGeneral, WeeklyOvertime, WeeklyTypeRepair,
};

// Source
pub use source::{CsvSource, RawTable, RecordSource, Snapshot};

// Configuration
pub use config::Config;

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Maintenance KPI Engine";
