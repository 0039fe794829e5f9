// ==========================================
// Maintenance KPI Engine - Event Records
// ==========================================
// Raw record: one sheet row after column mapping, before cleaning.
// Canonical record: the immutable analysis unit every engine consumes.
// ==========================================

use crate::domain::types::MaintenanceType;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

// ==========================================
// Raw event record (post-mapping, pre-normalization)
// ==========================================
// All fields optional: the mapper never rejects a row, it only extracts
// what it can. `None` on a numeric field covers both "column absent" and
// "cell unparseable" - the normalizer decides the substitute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEventRecord {
    pub equipment: Option<String>,
    pub assembly: Option<String>,
    pub technical_location: Option<String>,
    pub maintenance_type: Option<String>,
    pub status: Option<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,

    pub production_affected: Option<String>,

    pub scheduled_duration_min: Option<f64>,
    pub available_time_min: Option<f64>,
    pub real_repair_time_min: Option<f64>,
    pub fault_correction_time_min: Option<f64>,
    pub downtime_min: Option<f64>,
    pub overtime_min: Option<f64>,

    pub row_number: usize,
}

// ==========================================
// Maintenance event (canonical record)
// ==========================================
// One row per completed maintenance order. Numeric fields are minutes and
// non-negative after normalization. The record set is built once per data
// refresh and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceEvent {
    pub equipment: String,
    pub assembly: String,
    pub technical_location: Option<String>,
    pub maintenance_type: MaintenanceType,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,

    /// Gates whether TFS/TR/TFC count toward downtime-based metrics.
    pub production_affected: bool,

    pub scheduled_duration_min: f64,
    pub available_time_min: f64,
    /// TR: source value when present and non-zero, otherwise derived from
    /// the start/end timestamps.
    pub real_repair_time_min: f64,
    /// TFC
    pub fault_correction_time_min: f64,
    /// TFS
    pub downtime_min: f64,
    pub overtime_min: f64,
}

impl MaintenanceEvent {
    pub fn is_emergency(&self) -> bool {
        self.maintenance_type == MaintenanceType::EmergencyCorrective
    }
}
