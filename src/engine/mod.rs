// ==========================================
// Maintenance KPI Engine - Engine Layer
// ==========================================
// Stateless computation engines: every method is a pure function over
// an immutable record set.
// ==========================================

pub mod filter;
pub mod metrics;
pub mod reliability;
pub mod summary;
pub mod weekly;

pub use filter::{EventFilter, FilterEngine, SELECT_ALL};
pub use metrics::{MetricsCalculator, PlantMetrics, TypeShare};
pub use reliability::{ReliabilityCalculator, ReliabilityMetrics};
pub use summary::{BreakdownRow, RankedCount, SummaryEngine};
pub use weekly::{
    WeeklyAggregator, WeeklyEmergency, WeeklyGeneral, WeeklyOvertime, WeeklyTypeRepair,
};
