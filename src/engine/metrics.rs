// ==========================================
// Maintenance KPI Engine - Metrics Calculator
// ==========================================
// Responsibility: global plant KPI set over a (possibly filtered)
// record set. Stateless; every ratio carries an explicit zero branch
// so no degenerate denominator can produce an undefined result.
// ==========================================
// Glossary: TD available time / TO operating time / TFS downtime /
// TR repair time / TFC fault-correction time (all minutes).
// ==========================================

use crate::domain::event::MaintenanceEvent;
use crate::domain::types::MaintenanceType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Output types
// ==========================================

/// Repair-time share of one maintenance type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeShare {
    pub maintenance_type: MaintenanceType,
    pub repair_time_min: f64,
    pub share_pct: f64,
}

/// Global plant KPI set.
///
/// Absence of data is `None` at the calculator boundary, never a
/// zero-filled struct: "no data" and "all-zero data" are different answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantMetrics {
    /// TD: total available minutes in scope.
    pub available_time_min: f64,
    /// TFS over production-affecting events.
    pub downtime_min: f64,
    /// TR over production-affecting events.
    pub repair_time_min: f64,
    /// TFC over production-affecting events.
    pub fault_correction_time_min: f64,
    /// TO = max(TD - TFS, 0).
    pub operating_time_min: f64,
    pub availability_pct: f64,
    pub unavailability_pct: f64,
    /// Count of production-affecting events.
    pub failure_count: usize,
    pub mtbf_min: f64,
    pub mttf_min: f64,
    pub mttr_min: f64,
    /// 1 - exp(-lambda * TD), lambda = failure_count / TD.
    pub maintainability: f64,
    /// TR share per maintenance type, over all events in scope.
    pub type_distribution: Vec<TypeShare>,
    /// Overtime minutes over all events in scope.
    pub accumulated_overtime_min: f64,
}

// ==========================================
// MetricsCalculator
// ==========================================
pub struct MetricsCalculator;

impl MetricsCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute the global KPI set. Empty input yields `None`.
    pub fn calculate(&self, events: &[MaintenanceEvent]) -> Option<PlantMetrics> {
        if events.is_empty() {
            return None;
        }

        let available_time_min: f64 = events.iter().map(|e| e.available_time_min).sum();

        // TFS / TR / TFC only count where production was affected
        let affecting: Vec<&MaintenanceEvent> =
            events.iter().filter(|e| e.production_affected).collect();
        let downtime_min: f64 = affecting.iter().map(|e| e.downtime_min).sum();
        let repair_time_min: f64 = affecting.iter().map(|e| e.real_repair_time_min).sum();
        let fault_correction_time_min: f64 =
            affecting.iter().map(|e| e.fault_correction_time_min).sum();

        let operating_time_min = (available_time_min - downtime_min).max(0.0);

        let (availability_pct, unavailability_pct) = if available_time_min > 0.0 {
            (
                operating_time_min / available_time_min * 100.0,
                downtime_min / available_time_min * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        let failure_count = affecting.len();
        let (mtbf_min, mttf_min, mttr_min) = if failure_count > 0 {
            let n = failure_count as f64;
            (
                available_time_min / n,
                operating_time_min / n,
                repair_time_min / n,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        let lambda = if available_time_min > 0.0 {
            failure_count as f64 / available_time_min
        } else {
            0.0
        };
        let maintainability = if lambda > 0.0 {
            1.0 - (-lambda * available_time_min).exp()
        } else {
            0.0
        };

        let accumulated_overtime_min: f64 = events.iter().map(|e| e.overtime_min).sum();

        Some(PlantMetrics {
            available_time_min,
            downtime_min,
            repair_time_min,
            fault_correction_time_min,
            operating_time_min,
            availability_pct,
            unavailability_pct,
            failure_count,
            mtbf_min,
            mttf_min,
            mttr_min,
            maintainability,
            type_distribution: self.type_distribution(events),
            accumulated_overtime_min,
        })
    }

    /// TR share per maintenance type, over all events (production-affecting
    /// or not). Known types keep their priority order; unseen types are
    /// appended in first-seen order. All shares are 0 when total TR is 0.
    fn type_distribution(&self, events: &[MaintenanceEvent]) -> Vec<TypeShare> {
        let mut totals: HashMap<MaintenanceType, f64> = HashMap::new();
        for event in events {
            *totals.entry(event.maintenance_type.clone()).or_insert(0.0) +=
                event.real_repair_time_min;
        }
        let grand_total: f64 = totals.values().sum();

        let ordered = MaintenanceType::ordered_distinct(events.iter().map(|e| &e.maintenance_type));
        ordered
            .into_iter()
            .map(|ty| {
                let repair_time_min = totals.get(&ty).copied().unwrap_or(0.0);
                let share_pct = if grand_total > 0.0 {
                    repair_time_min / grand_total * 100.0
                } else {
                    0.0
                };
                TypeShare {
                    maintenance_type: ty,
                    repair_time_min,
                    share_pct,
                }
            })
            .collect()
    }
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new()
    }
}
