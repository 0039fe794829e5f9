// ==========================================
// Maintenance KPI Engine - Weekly Aggregator
// ==========================================
// Responsibility: ISO-week bucketing of the record set into the series
// the charts consume. Accumulation goes through a HashMap keyed by
// WeekKey; ordering is a final explicit sort on the numeric composite
// key, never an ordered-collection side effect.
// Records without a start date cannot be bucketed and are skipped.
// ==========================================

use crate::domain::event::MaintenanceEvent;
use crate::domain::types::{MaintenanceType, WeekKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Series rows
// ==========================================

/// General view: downtime/repair series over production-affecting events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyGeneral {
    pub week: WeekKey,
    pub label: String,
    pub downtime_min: f64,
    pub repair_time_min: f64,
    pub fault_correction_time_min: f64,
    pub available_time_min: f64,
    pub failure_count: usize,
    pub availability_pct: f64,
}

/// Overtime view: extra-hours series over all events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyOvertime {
    pub week: WeekKey,
    pub label: String,
    pub overtime_min: f64,
}

/// Emergency view: emergency-corrective counts and MTTR per week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyEmergency {
    pub week: WeekKey,
    pub label: String,
    pub repair_time_min: f64,
    pub fault_correction_time_min: f64,
    pub downtime_min: f64,
    /// First-seen available-time value in the bucket, kept as a reference.
    pub available_time_ref_min: f64,
    /// Emergency orders in the bucket, stoppage or not.
    pub order_count: usize,
    /// Emergency orders that stopped production.
    pub stoppage_count: usize,
    pub mttr_min: f64,
}

/// Type view: repair time per (week, maintenance type), for the stacked
/// weekly chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTypeRepair {
    pub week: WeekKey,
    pub label: String,
    pub maintenance_type: MaintenanceType,
    pub repair_time_min: f64,
}

// ==========================================
// WeeklyAggregator
// ==========================================
pub struct WeeklyAggregator;

#[derive(Default)]
struct GeneralAcc {
    downtime_min: f64,
    repair_time_min: f64,
    fault_correction_time_min: f64,
    available_time_min: f64,
    failure_count: usize,
}

#[derive(Default)]
struct EmergencyAcc {
    repair_time_min: f64,
    fault_correction_time_min: f64,
    downtime_min: f64,
    available_time_ref_min: Option<f64>,
    order_count: usize,
    stoppage_count: usize,
}

impl WeeklyAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Weekly downtime/repair series, production-affecting events only.
    pub fn general_series(&self, events: &[MaintenanceEvent]) -> Vec<WeeklyGeneral> {
        let mut buckets: HashMap<WeekKey, GeneralAcc> = HashMap::new();

        for event in events.iter().filter(|e| e.production_affected) {
            let Some(date) = event.start_date else { continue };
            let acc = buckets.entry(WeekKey::from_date(date)).or_default();
            acc.downtime_min += event.downtime_min;
            acc.repair_time_min += event.real_repair_time_min;
            acc.fault_correction_time_min += event.fault_correction_time_min;
            acc.available_time_min += event.available_time_min;
            acc.failure_count += 1;
        }

        let mut rows: Vec<WeeklyGeneral> = buckets
            .into_iter()
            .map(|(week, acc)| {
                let availability_pct = if acc.available_time_min > 0.0 {
                    (acc.available_time_min - acc.downtime_min) / acc.available_time_min * 100.0
                } else {
                    0.0
                };
                WeeklyGeneral {
                    week,
                    label: week.label(),
                    downtime_min: acc.downtime_min,
                    repair_time_min: acc.repair_time_min,
                    fault_correction_time_min: acc.fault_correction_time_min,
                    available_time_min: acc.available_time_min,
                    failure_count: acc.failure_count,
                    availability_pct,
                }
            })
            .collect();
        rows.sort_by_key(|r| r.week.sort_key());
        rows
    }

    /// Weekly overtime series over all events, no production filter.
    pub fn overtime_series(&self, events: &[MaintenanceEvent]) -> Vec<WeeklyOvertime> {
        let mut buckets: HashMap<WeekKey, f64> = HashMap::new();

        for event in events {
            let Some(date) = event.start_date else { continue };
            *buckets.entry(WeekKey::from_date(date)).or_insert(0.0) += event.overtime_min;
        }

        let mut rows: Vec<WeeklyOvertime> = buckets
            .into_iter()
            .map(|(week, overtime_min)| WeeklyOvertime {
                week,
                label: week.label(),
                overtime_min,
            })
            .collect();
        rows.sort_by_key(|r| r.week.sort_key());
        rows
    }

    /// Weekly emergency-corrective series. Weeks without an emergency
    /// order are absent from the result, not emitted as zero rows.
    pub fn emergency_series(&self, events: &[MaintenanceEvent]) -> Vec<WeeklyEmergency> {
        let mut buckets: HashMap<WeekKey, EmergencyAcc> = HashMap::new();

        for event in events.iter().filter(|e| e.is_emergency()) {
            let Some(date) = event.start_date else { continue };
            let acc = buckets.entry(WeekKey::from_date(date)).or_default();
            acc.repair_time_min += event.real_repair_time_min;
            acc.fault_correction_time_min += event.fault_correction_time_min;
            acc.downtime_min += event.downtime_min;
            acc.available_time_ref_min
                .get_or_insert(event.available_time_min);
            acc.order_count += 1;
            if event.production_affected {
                acc.stoppage_count += 1;
            }
        }

        let mut rows: Vec<WeeklyEmergency> = buckets
            .into_iter()
            .map(|(week, acc)| {
                let mttr_min = if acc.order_count > 0 {
                    acc.repair_time_min / acc.order_count as f64
                } else {
                    0.0
                };
                WeeklyEmergency {
                    week,
                    label: week.label(),
                    repair_time_min: acc.repair_time_min,
                    fault_correction_time_min: acc.fault_correction_time_min,
                    downtime_min: acc.downtime_min,
                    available_time_ref_min: acc.available_time_ref_min.unwrap_or(0.0),
                    order_count: acc.order_count,
                    stoppage_count: acc.stoppage_count,
                    mttr_min,
                }
            })
            .collect();
        rows.sort_by_key(|r| r.week.sort_key());
        rows
    }

    /// Weekly repair time per maintenance type, over all events. Rows are
    /// ordered by week, then by the open-enum type order.
    pub fn type_series(&self, events: &[MaintenanceEvent]) -> Vec<WeeklyTypeRepair> {
        let mut buckets: HashMap<(WeekKey, MaintenanceType), f64> = HashMap::new();

        for event in events {
            let Some(date) = event.start_date else { continue };
            let key = (WeekKey::from_date(date), event.maintenance_type.clone());
            *buckets.entry(key).or_insert(0.0) += event.real_repair_time_min;
        }

        let type_order =
            MaintenanceType::ordered_distinct(events.iter().map(|e| &e.maintenance_type));
        let type_rank = |ty: &MaintenanceType| {
            type_order
                .iter()
                .position(|t| t == ty)
                .unwrap_or(type_order.len())
        };

        let mut rows: Vec<WeeklyTypeRepair> = buckets
            .into_iter()
            .map(|((week, maintenance_type), repair_time_min)| WeeklyTypeRepair {
                week,
                label: week.label(),
                maintenance_type,
                repair_time_min,
            })
            .collect();
        rows.sort_by_key(|r| (r.week.sort_key(), type_rank(&r.maintenance_type)));
        rows
    }
}

impl Default for WeeklyAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(
        ty: MaintenanceType,
        affected: bool,
        start: Option<&str>,
        tr: f64,
        tfs: f64,
        td: f64,
        overtime: f64,
    ) -> MaintenanceEvent {
        MaintenanceEvent {
            equipment: "EQ".to_string(),
            assembly: "AS".to_string(),
            technical_location: None,
            maintenance_type: ty,
            start_date: start.map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()),
            end_date: None,
            start_time: None,
            end_time: None,
            production_affected: affected,
            scheduled_duration_min: 0.0,
            available_time_min: td,
            real_repair_time_min: tr,
            fault_correction_time_min: 0.0,
            downtime_min: tfs,
            overtime_min: overtime,
        }
    }

    #[test]
    fn test_general_series_buckets_and_availability() {
        let agg = WeeklyAggregator::new();
        let events = vec![
            // 2025-02-10 and 2025-02-12 share ISO week 7
            event(MaintenanceType::Preventive, true, Some("2025-02-10"), 30.0, 60.0, 1440.0, 0.0),
            event(MaintenanceType::EmergencyCorrective, true, Some("2025-02-12"), 60.0, 84.0, 1440.0, 0.0),
            // week 8
            event(MaintenanceType::Preventive, true, Some("2025-02-17"), 10.0, 0.0, 1440.0, 0.0),
            // not production-affecting: excluded from the general view
            event(MaintenanceType::Preventive, false, Some("2025-02-17"), 99.0, 99.0, 1440.0, 0.0),
        ];

        let series = agg.general_series(&events);
        assert_eq!(series.len(), 2);

        let week7 = &series[0];
        assert_eq!(week7.label, "2025-S07");
        assert_eq!(week7.failure_count, 2);
        assert_eq!(week7.downtime_min, 144.0);
        assert_eq!(week7.available_time_min, 2880.0);
        assert!((week7.availability_pct - 95.0).abs() < 1e-9);

        assert_eq!(series[1].label, "2025-S08");
        assert_eq!(series[1].failure_count, 1);
    }

    #[test]
    fn test_series_sorted_across_year_boundary() {
        let agg = WeeklyAggregator::new();
        let events = vec![
            event(MaintenanceType::Preventive, true, Some("2025-01-06"), 1.0, 0.0, 0.0, 0.0),
            event(MaintenanceType::Preventive, true, Some("2024-12-23"), 1.0, 0.0, 0.0, 0.0),
        ];

        let series = agg.general_series(&events);
        let keys: Vec<i64> = series.iter().map(|r| r.week.sort_key()).collect();
        assert_eq!(keys, vec![202452, 202502]);

        // strictly ascending, no duplicate keys
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_overtime_series_includes_all_events() {
        let agg = WeeklyAggregator::new();
        let events = vec![
            event(MaintenanceType::Preventive, false, Some("2025-02-10"), 0.0, 0.0, 0.0, 45.0),
            event(MaintenanceType::EmergencyCorrective, true, Some("2025-02-12"), 0.0, 0.0, 0.0, 15.0),
        ];

        let series = agg.overtime_series(&events);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].overtime_min, 60.0);
    }

    #[test]
    fn test_emergency_series_counts_and_mttr() {
        let agg = WeeklyAggregator::new();
        let events = vec![
            event(MaintenanceType::EmergencyCorrective, true, Some("2025-02-10"), 60.0, 100.0, 1440.0, 0.0),
            event(MaintenanceType::EmergencyCorrective, false, Some("2025-02-11"), 20.0, 0.0, 1500.0, 0.0),
            // a preventive order the same week never reaches this view
            event(MaintenanceType::Preventive, true, Some("2025-02-11"), 99.0, 0.0, 0.0, 0.0),
        ];

        let series = agg.emergency_series(&events);
        assert_eq!(series.len(), 1);

        let row = &series[0];
        assert_eq!(row.order_count, 2);
        assert_eq!(row.stoppage_count, 1);
        assert_eq!(row.repair_time_min, 80.0);
        assert_eq!(row.mttr_min, 40.0);
        // first-seen available time, not a sum
        assert_eq!(row.available_time_ref_min, 1440.0);
    }

    #[test]
    fn test_emergency_free_weeks_absent() {
        let agg = WeeklyAggregator::new();
        let events = vec![
            event(MaintenanceType::EmergencyCorrective, true, Some("2025-02-10"), 60.0, 0.0, 0.0, 0.0),
            event(MaintenanceType::Preventive, true, Some("2025-02-17"), 30.0, 0.0, 0.0, 0.0),
        ];

        let series = agg.emergency_series(&events);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "2025-S07");
    }

    #[test]
    fn test_missing_start_date_skipped() {
        let agg = WeeklyAggregator::new();
        let events = vec![event(MaintenanceType::EmergencyCorrective, true, None, 60.0, 0.0, 0.0, 30.0)];

        assert!(agg.general_series(&events).is_empty());
        assert!(agg.overtime_series(&events).is_empty());
        assert!(agg.emergency_series(&events).is_empty());
        assert!(agg.type_series(&events).is_empty());
    }

    #[test]
    fn test_type_series_order_within_week() {
        let agg = WeeklyAggregator::new();
        let events = vec![
            event(MaintenanceType::Other("PREDICTIVO".to_string()), false, Some("2025-02-10"), 10.0, 0.0, 0.0, 0.0),
            event(MaintenanceType::EmergencyCorrective, true, Some("2025-02-11"), 20.0, 0.0, 0.0, 0.0),
            event(MaintenanceType::Preventive, false, Some("2025-02-12"), 30.0, 0.0, 0.0, 0.0),
        ];

        let series = agg.type_series(&events);
        assert_eq!(series.len(), 3);
        // known priority order first, unknown appended last
        assert_eq!(series[0].maintenance_type, MaintenanceType::Preventive);
        assert_eq!(series[1].maintenance_type, MaintenanceType::EmergencyCorrective);
        assert_eq!(
            series[2].maintenance_type,
            MaintenanceType::Other("PREDICTIVO".to_string())
        );
    }

    #[test]
    fn test_empty_input_empty_series() {
        let agg = WeeklyAggregator::new();
        assert!(agg.general_series(&[]).is_empty());
        assert!(agg.overtime_series(&[]).is_empty());
        assert!(agg.emergency_series(&[]).is_empty());
        assert!(agg.type_series(&[]).is_empty());
    }
}
