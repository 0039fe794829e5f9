// ==========================================
// Maintenance KPI Engine - Field Derivation
// ==========================================
// Responsibility: real_repair_time_min (TR) derivation from the
// start/end timestamps. The only fallible arithmetic in the engine
// lives here; callers substitute 0 on any gap.
// ==========================================

use chrono::{NaiveDate, NaiveTime};

pub struct DerivationService;

impl DerivationService {
    pub fn new() -> Self {
        Self
    }

    /// Derive a duration in minutes from paired date + time-of-day fields.
    ///
    /// # Rules
    /// - start = start_date + start_time, end = end_date + end_time
    /// - duration = (end - start) in minutes, clamped at 0
    /// - any missing part -> None (caller substitutes 0)
    pub fn derive_duration_minutes(
        &self,
        start_date: Option<NaiveDate>,
        start_time: Option<NaiveTime>,
        end_date: Option<NaiveDate>,
        end_time: Option<NaiveTime>,
    ) -> Option<f64> {
        let start = start_date?.and_time(start_time?);
        let end = end_date?.and_time(end_time?);

        let minutes = (end - start).num_seconds() as f64 / 60.0;
        Some(minutes.max(0.0))
    }

    /// Resolve the canonical TR value.
    ///
    /// # Rules
    /// - source value wins when present and non-zero
    /// - otherwise the derived value, 0 when that is missing too
    pub fn resolve_repair_time(&self, source: Option<f64>, derived: Option<f64>) -> f64 {
        match source {
            Some(tr) if tr != 0.0 => tr.max(0.0),
            _ => derived.unwrap_or(0.0),
        }
    }
}

impl Default for DerivationService {
    fn default() -> Self {
        Self::new()
    }
}
