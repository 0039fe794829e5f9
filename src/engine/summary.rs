// ==========================================
// Maintenance KPI Engine - Summary Breakdowns
// ==========================================
// Responsibility: per-equipment and per-assembly downtime/repair
// breakdown tables, and the emergency failure-count rankings.
// Stateless; callers truncate for top-N presentation.
// ==========================================

use crate::domain::event::MaintenanceEvent;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-group TFS/TR/TFC sums over production-affecting events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub key: String,
    pub downtime_min: f64,
    pub repair_time_min: f64,
    pub fault_correction_time_min: f64,
}

/// Ranked emergency-order count for one equipment/assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCount {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub key: String,
    pub failure_count: usize,
}

pub struct SummaryEngine;

impl SummaryEngine {
    pub fn new() -> Self {
        Self
    }

    /// TFS/TR/TFC totals grouped by equipment, production-affecting events
    /// only, sorted by downtime descending (ties by key).
    pub fn by_equipment(&self, events: &[MaintenanceEvent]) -> Vec<BreakdownRow> {
        self.breakdown(events, |e| e.equipment.clone())
    }

    /// Same breakdown grouped by assembly.
    pub fn by_assembly(&self, events: &[MaintenanceEvent]) -> Vec<BreakdownRow> {
        self.breakdown(events, |e| e.assembly.clone())
    }

    /// Emergency-corrective order counts per equipment, ranked descending.
    pub fn emergency_ranking_by_equipment(&self, events: &[MaintenanceEvent]) -> Vec<RankedCount> {
        self.emergency_ranking(events, |e| e.equipment.clone())
    }

    /// Emergency-corrective order counts per assembly, ranked descending.
    pub fn emergency_ranking_by_assembly(&self, events: &[MaintenanceEvent]) -> Vec<RankedCount> {
        self.emergency_ranking(events, |e| e.assembly.clone())
    }

    fn breakdown<F>(&self, events: &[MaintenanceEvent], key_fn: F) -> Vec<BreakdownRow>
    where
        F: Fn(&MaintenanceEvent) -> String,
    {
        let mut groups: HashMap<String, (f64, f64, f64)> = HashMap::new();
        for event in events.iter().filter(|e| e.production_affected) {
            let entry = groups.entry(key_fn(event)).or_insert((0.0, 0.0, 0.0));
            entry.0 += event.downtime_min;
            entry.1 += event.real_repair_time_min;
            entry.2 += event.fault_correction_time_min;
        }

        let mut rows: Vec<BreakdownRow> = groups
            .into_iter()
            .map(|(key, (tfs, tr, tfc))| BreakdownRow {
                key,
                downtime_min: tfs,
                repair_time_min: tr,
                fault_correction_time_min: tfc,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.downtime_min
                .partial_cmp(&a.downtime_min)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.key.cmp(&b.key))
        });
        rows
    }

    fn emergency_ranking<F>(&self, events: &[MaintenanceEvent], key_fn: F) -> Vec<RankedCount>
    where
        F: Fn(&MaintenanceEvent) -> String,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for event in events.iter().filter(|e| e.is_emergency()) {
            *counts.entry(key_fn(event)).or_insert(0) += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        ranked
            .into_iter()
            .enumerate()
            .map(|(idx, (key, failure_count))| RankedCount {
                rank: idx + 1,
                key,
                failure_count,
            })
            .collect()
    }
}

impl Default for SummaryEngine {
    fn default() -> Self {
        Self::new()
    }
}
