// ==========================================
// Maintenance KPI Engine - Reliability Calculator
// ==========================================
// Responsibility: the KPI family restricted to emergency-corrective
// orders. Every emergency order counts as a failure, whether or not it
// stopped production. TD stays plant-wide: available time is a
// plant-level quantity, not type-specific.
// ==========================================

use crate::domain::event::MaintenanceEvent;
use serde::{Deserialize, Serialize};

/// Reliability KPI set over the emergency-corrective subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityMetrics {
    /// TD from the full (unrestricted) input.
    pub available_time_min: f64,
    /// TR over the emergency subset.
    pub repair_time_min: f64,
    /// TFC over the emergency subset.
    pub fault_correction_time_min: f64,
    /// TFS over the emergency subset.
    pub downtime_min: f64,
    /// Every emergency order.
    pub failure_count: usize,
    /// Emergency orders that stopped production.
    pub stoppage_failure_count: usize,
    pub mtbf_min: f64,
    pub mttr_min: f64,
    pub mttf_min: f64,
    /// TO = max(TD - TFS over emergency∩production-affecting, 0).
    pub operating_time_min: f64,
    /// (1 - exp(-lambda * TD)) * 100, lambda = failure_count / TD.
    pub maintainability_pct: f64,
}

pub struct ReliabilityCalculator;

impl ReliabilityCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute emergency reliability metrics. `None` when the input or its
    /// emergency-corrective subset is empty ("no data", not all-zero).
    pub fn calculate(&self, events: &[MaintenanceEvent]) -> Option<ReliabilityMetrics> {
        if events.is_empty() {
            return None;
        }

        let emergency: Vec<&MaintenanceEvent> =
            events.iter().filter(|e| e.is_emergency()).collect();
        if emergency.is_empty() {
            return None;
        }

        // Plant-wide available time, not the emergency subset's
        let available_time_min: f64 = events.iter().map(|e| e.available_time_min).sum();

        let repair_time_min: f64 = emergency.iter().map(|e| e.real_repair_time_min).sum();
        let fault_correction_time_min: f64 =
            emergency.iter().map(|e| e.fault_correction_time_min).sum();
        let downtime_min: f64 = emergency.iter().map(|e| e.downtime_min).sum();

        let failure_count = emergency.len();
        let stoppage_failure_count = emergency.iter().filter(|e| e.production_affected).count();

        // TO uses only emergency downtime that actually stopped production
        let stoppage_downtime: f64 = emergency
            .iter()
            .filter(|e| e.production_affected)
            .map(|e| e.downtime_min)
            .sum();
        let operating_time_min = (available_time_min - stoppage_downtime).max(0.0);

        let n = failure_count as f64;
        let mtbf_min = if available_time_min > 0.0 {
            available_time_min / n
        } else {
            0.0
        };
        let mttr_min = repair_time_min / n;
        let mttf_min = operating_time_min / n;

        let lambda = if available_time_min > 0.0 {
            n / available_time_min
        } else {
            0.0
        };
        let maintainability_pct = if lambda > 0.0 {
            (1.0 - (-lambda * available_time_min).exp()) * 100.0
        } else {
            0.0
        };

        Some(ReliabilityMetrics {
            available_time_min,
            repair_time_min,
            fault_correction_time_min,
            downtime_min,
            failure_count,
            stoppage_failure_count,
            mtbf_min,
            mttr_min,
            mttf_min,
            operating_time_min,
            maintainability_pct,
        })
    }
}

impl Default for ReliabilityCalculator {
    fn default() -> Self {
        Self::new()
    }
}
