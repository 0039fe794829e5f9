// ==========================================
// Maintenance KPI Engine - Record Normalizer
// ==========================================
// Responsibility: raw sheet rows -> canonical analysis set.
// Stages: column mapping -> numeric coercion -> TR derivation ->
// COMPLETED status gate. The gate is terminal: excluded rows are gone
// for good. The input is never mutated.
// ==========================================

use crate::domain::event::{MaintenanceEvent, RawEventRecord};
use crate::domain::types::{EventStatus, MaintenanceType};
use crate::importer::derivation::DerivationService;
use crate::importer::field_mapper::FieldMapper;
use std::collections::HashMap;
use tracing::debug;

pub struct RecordNormalizer {
    mapper: FieldMapper,
    derivation: DerivationService,
}

impl RecordNormalizer {
    pub fn new() -> Self {
        Self {
            mapper: FieldMapper::new(),
            derivation: DerivationService::new(),
        }
    }

    /// Normalize a raw tabular record set.
    ///
    /// Returns a new canonical record set; unrecoverable input (empty, or
    /// nothing completed) yields an empty set rather than an error.
    pub fn normalize(&self, rows: &[HashMap<String, String>]) -> Vec<MaintenanceEvent> {
        let total = rows.len();

        let events: Vec<MaintenanceEvent> = rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| self.normalize_row(row, idx + 1))
            .collect();

        debug!(
            total_rows = total,
            completed_rows = events.len(),
            "record normalization finished"
        );
        events
    }

    /// Normalize one row; None when the status gate excludes it.
    fn normalize_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> Option<MaintenanceEvent> {
        let raw = self.mapper.map_row(row, row_number);

        // Terminal filter: only COMPLETED orders enter the analysis set.
        let status = raw.status.as_deref().map(EventStatus::from_source);
        if !status.map(|s| s.is_completed()).unwrap_or(false) {
            return None;
        }

        Some(self.to_canonical(raw))
    }

    fn to_canonical(&self, raw: RawEventRecord) -> MaintenanceEvent {
        let derived = self.derivation.derive_duration_minutes(
            raw.start_date,
            raw.start_time,
            raw.end_date,
            raw.end_time,
        );
        let real_repair_time_min = self
            .derivation
            .resolve_repair_time(raw.real_repair_time_min, derived);

        MaintenanceEvent {
            equipment: raw.equipment.unwrap_or_default(),
            assembly: raw.assembly.unwrap_or_default(),
            technical_location: raw.technical_location,
            maintenance_type: raw
                .maintenance_type
                .as_deref()
                .map(MaintenanceType::from_source)
                .unwrap_or_else(|| MaintenanceType::Other(String::new())),

            start_date: raw.start_date,
            end_date: raw.end_date,
            start_time: raw.start_time,
            end_time: raw.end_time,

            production_affected: FieldMapper::parse_yes_no(raw.production_affected.as_deref()),

            scheduled_duration_min: Self::clean_minutes(raw.scheduled_duration_min),
            available_time_min: Self::clean_minutes(raw.available_time_min),
            real_repair_time_min: real_repair_time_min.max(0.0),
            fault_correction_time_min: Self::clean_minutes(raw.fault_correction_time_min),
            downtime_min: Self::clean_minutes(raw.downtime_min),
            overtime_min: Self::clean_minutes(raw.overtime_min),
        }
    }

    /// Coercion failures become zero; minutes are never negative.
    fn clean_minutes(value: Option<f64>) -> f64 {
        value.unwrap_or(0.0).max(0.0)
    }
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn completed_row(mut pairs: Vec<(&'static str, &'static str)>) -> HashMap<String, String> {
        pairs.push(("STATUS", "CULMINADO"));
        row(&pairs)
    }

    #[test]
    fn test_status_gate_is_terminal() {
        let normalizer = RecordNormalizer::new();
        let rows = vec![
            completed_row(vec![("EQUIPO", "A")]),
            row(&[("EQUIPO", "B"), ("STATUS", "EN PROCESO")]),
            row(&[("EQUIPO", "C")]), // no status column at all
        ];

        let events = normalizer.normalize(&rows);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].equipment, "A");
    }

    #[test]
    fn test_tr_source_value_kept() {
        let normalizer = RecordNormalizer::new();
        let rows = vec![completed_row(vec![
            ("TR (min)", "60"),
            ("FECHA DE INICIO", "2025-02-10"),
            ("HORA INICIO", "10:00:00"),
            ("FECHA DE FIN", "2025-02-10"),
            ("HORA FINAL", "10:45:00"),
        ])];

        let events = normalizer.normalize(&rows);
        assert_eq!(events[0].real_repair_time_min, 60.0);
    }

    #[test]
    fn test_tr_derived_when_absent() {
        let normalizer = RecordNormalizer::new();
        let rows = vec![completed_row(vec![
            ("FECHA DE INICIO", "2025-02-10"),
            ("HORA INICIO", "10:00:00"),
            ("FECHA DE FIN", "2025-02-10"),
            ("HORA FINAL", "10:45:00"),
        ])];

        let events = normalizer.normalize(&rows);
        assert_eq!(events[0].real_repair_time_min, 45.0);
    }

    #[test]
    fn test_tr_derived_when_zero() {
        let normalizer = RecordNormalizer::new();
        let rows = vec![completed_row(vec![
            ("TR (min)", "0"),
            ("FECHA DE INICIO", "2025-02-10"),
            ("HORA INICIO", "08:00:00"),
            ("FECHA DE FIN", "2025-02-10"),
            ("HORA FINAL", "09:30:00"),
        ])];

        let events = normalizer.normalize(&rows);
        assert_eq!(events[0].real_repair_time_min, 90.0);
    }

    #[test]
    fn test_parse_failure_yields_zero_duration() {
        let normalizer = RecordNormalizer::new();
        let rows = vec![completed_row(vec![
            ("FECHA DE INICIO", "2025-02-10"),
            ("HORA INICIO", "garbage"),
            ("FECHA DE FIN", "2025-02-10"),
            ("HORA FINAL", "10:45:00"),
        ])];

        let events = normalizer.normalize(&rows);
        assert_eq!(events[0].real_repair_time_min, 0.0);
    }

    #[test]
    fn test_numeric_coercion_bad_cells_become_zero() {
        let normalizer = RecordNormalizer::new();
        let rows = vec![completed_row(vec![
            ("TFS (min)", "no data"),
            ("TFC (min)", "-15"),
            ("TIEMPO ESTIMADO DIARIO (min)", "1440"),
        ])];

        let events = normalizer.normalize(&rows);
        assert_eq!(events.len(), 1); // row kept despite the bad cells
        assert_eq!(events[0].downtime_min, 0.0);
        assert_eq!(events[0].fault_correction_time_min, 0.0); // clamped
        assert_eq!(events[0].available_time_min, 1440.0);
    }

    #[test]
    fn test_maintenance_type_and_flag() {
        let normalizer = RecordNormalizer::new();
        let rows = vec![completed_row(vec![
            ("TIPO DE MTTO", "CORRECTIVO DE EMERGENCIA"),
            ("PRODUCCIÓN AFECTADA (SI-NO)", "SI"),
        ])];

        let events = normalizer.normalize(&rows);
        assert_eq!(
            events[0].maintenance_type,
            MaintenanceType::EmergencyCorrective
        );
        assert!(events[0].production_affected);
    }

    #[test]
    fn test_empty_input_yields_empty_set() {
        let normalizer = RecordNormalizer::new();
        assert!(normalizer.normalize(&[]).is_empty());
    }
}
