// ==========================================
// Maintenance KPI Engine - Field Mapper
// ==========================================
// Responsibility: source column -> canonical field mapping + lenient
// type coercion. The sheet headers are Spanish and drift between
// exports, so every canonical field carries an alias list.
// A row is never rejected here: unreadable cells simply map to None.
// ==========================================

use crate::domain::event::RawEventRecord;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashMap;

pub struct FieldMapper;

impl FieldMapper {
    pub fn new() -> Self {
        Self
    }

    /// Map one raw sheet row to a raw event record.
    pub fn map_row(&self, row: &HashMap<String, String>, row_number: usize) -> RawEventRecord {
        RawEventRecord {
            equipment: self.get_string(row, "EQUIPO"),
            assembly: self.get_string(row, "CONJUNTO"),
            technical_location: self.get_string(row, "UBICACIÓN TÉCNICA"),
            maintenance_type: self.get_string(row, "TIPO DE MTTO"),
            status: self.get_string(row, "STATUS"),

            start_date: self.parse_date(row, "FECHA DE INICIO"),
            end_date: self.parse_date(row, "FECHA DE FIN"),
            start_time: self.parse_time(row, "HORA INICIO"),
            end_time: self.parse_time(row, "HORA FINAL"),

            production_affected: self.get_string(row, "PRODUCCIÓN AFECTADA (SI-NO)"),

            scheduled_duration_min: self.parse_f64(row, "Tiempo Prog (min)"),
            available_time_min: self.parse_f64(row, "TIEMPO ESTIMADO DIARIO (min)"),
            real_repair_time_min: self.parse_f64(row, "TR (min)"),
            fault_correction_time_min: self.parse_f64(row, "TFC (min)"),
            downtime_min: self.parse_f64(row, "TFS (min)"),
            overtime_min: self.parse_f64(row, "h extra (min)"),

            row_number,
        }
    }

    /// Extract a string field (trimmed, empty as None), trying every known
    /// alias of the canonical column name.
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        // Known column aliases across sheet exports
        let aliases: Vec<&str> = match key {
            "UBICACIÓN TÉCNICA" => vec![
                "UBICACIÓN TÉCNICA",
                "UBICACION TECNICA",
                "Ubicación Técnica",
            ],
            "TIPO DE MTTO" => vec!["TIPO DE MTTO", "TIPO DE MANTENIMIENTO"],
            "STATUS" => vec!["STATUS", "ESTADO"],
            "FECHA DE INICIO" => vec!["FECHA DE INICIO", "FECHA_DE_INICIO"],
            "FECHA DE FIN" => vec!["FECHA DE FIN", "FECHA_DE_FIN"],
            "HORA INICIO" => vec!["HORA INICIO", "HORA_INICIO"],
            "HORA FINAL" => vec!["HORA FINAL", "HORA_FINAL"],
            "PRODUCCIÓN AFECTADA (SI-NO)" => vec![
                "PRODUCCIÓN AFECTADA (SI-NO)",
                "PRODUCCION AFECTADA (SI-NO)",
                "PRODUCCION_AFECTADA",
            ],
            "Tiempo Prog (min)" => vec!["Tiempo Prog (min)", "TIEMPO_PROG_MIN"],
            "TIEMPO ESTIMADO DIARIO (min)" => {
                vec!["TIEMPO ESTIMADO DIARIO (min)", "TDISPONIBLE"]
            }
            "TR (min)" => vec!["TR (min)", "TR_MIN"],
            "TFC (min)" => vec!["TFC (min)", "TFC_MIN"],
            "TFS (min)" => vec!["TFS (min)", "TFS_MIN"],
            "h extra (min)" => vec!["h extra (min)", "H_EXTRA_MIN"],
            _ => vec![key],
        };

        for alias in aliases {
            if let Some(v) = row.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// Parse a numeric cell. Unparseable values map to None; the
    /// normalizer substitutes zero, so no row is dropped for a bad cell.
    fn parse_f64(&self, row: &HashMap<String, String>, key: &str) -> Option<f64> {
        self.get_string(row, key)
            .and_then(|value| value.parse::<f64>().ok())
    }

    /// Parse a date cell. Tries the formats seen across exports; a time
    /// component is tolerated and truncated.
    fn parse_date(&self, row: &HashMap<String, String>, key: &str) -> Option<NaiveDate> {
        let value = self.get_string(row, key)?;
        const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(&value, format) {
                return Some(date);
            }
        }
        // Datetime-formatted exports ("2025-01-20 00:00:00")
        NaiveDateTime::parse_from_str(&value, "%Y-%m-%d %H:%M:%S")
            .map(|dt| dt.date())
            .ok()
    }

    /// Parse a time-of-day cell (HH:MM:SS or HH:MM).
    fn parse_time(&self, row: &HashMap<String, String>, key: &str) -> Option<NaiveTime> {
        let value = self.get_string(row, key)?;
        NaiveTime::parse_from_str(&value, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&value, "%H:%M"))
            .ok()
    }

    /// SI/NO flag (YES/Y accepted); anything else counts as "no".
    pub fn parse_yes_no(value: Option<&str>) -> bool {
        match value {
            Some(v) => matches!(v.trim().to_uppercase().as_str(), "SI" | "SÍ" | "YES" | "Y"),
            None => false,
        }
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}
