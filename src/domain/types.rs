// ==========================================
// Maintenance KPI Engine - Domain Types
// ==========================================
// Categorical types shared by the importer and the engines.
// Serialization format: SCREAMING_SNAKE_CASE (matches source sheet)
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Maintenance type (open categorical)
// ==========================================
// The source appends unknown categories on the fly, so this is an open
// enum: five well-known variants plus a catch-all that preserves the
// original label. Distribution outputs keep the known variants in a fixed
// priority order and append the rest in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceType {
    Preventive,
    ConditionBased,
    ScheduledCorrective,
    EmergencyCorrective,
    SystemImprovement,
    Other(String),
}

impl MaintenanceType {
    /// Fixed priority order for the well-known categories.
    pub const KNOWN_ORDER: [MaintenanceType; 5] = [
        MaintenanceType::Preventive,
        MaintenanceType::ConditionBased,
        MaintenanceType::ScheduledCorrective,
        MaintenanceType::EmergencyCorrective,
        MaintenanceType::SystemImprovement,
    ];

    /// Map a source label to a maintenance type.
    ///
    /// Accepts the sheet's Spanish labels as well as canonical English
    /// spellings. Anything else is preserved as `Other`.
    pub fn from_source(value: &str) -> Self {
        let upper = value.trim().to_uppercase();
        match upper.as_str() {
            "PREVENTIVO" | "PREVENTIVE" => MaintenanceType::Preventive,
            "BASADO EN CONDICIÓN" | "BASADO EN CONDICION" | "CONDITION_BASED"
            | "CONDITION BASED" => MaintenanceType::ConditionBased,
            "CORRECTIVO PROGRAMADO" | "SCHEDULED_CORRECTIVE" | "SCHEDULED CORRECTIVE" => {
                MaintenanceType::ScheduledCorrective
            }
            "CORRECTIVO DE EMERGENCIA" | "EMERGENCY_CORRECTIVE" | "EMERGENCY CORRECTIVE" => {
                MaintenanceType::EmergencyCorrective
            }
            "MEJORA DE SISTEMA" | "SYSTEM_IMPROVEMENT" | "SYSTEM IMPROVEMENT" => {
                MaintenanceType::SystemImprovement
            }
            _ => MaintenanceType::Other(upper),
        }
    }

    /// Ordered distinct list of types: known categories first (in priority
    /// order, only if present), then unknown categories in first-seen order.
    pub fn ordered_distinct<'a, I>(types: I) -> Vec<MaintenanceType>
    where
        I: IntoIterator<Item = &'a MaintenanceType>,
    {
        let seen: Vec<&MaintenanceType> = types.into_iter().collect();
        let mut ordered: Vec<MaintenanceType> = Vec::new();

        for known in MaintenanceType::KNOWN_ORDER.iter() {
            if seen.contains(&known) {
                ordered.push(known.clone());
            }
        }
        for ty in seen {
            if !ordered.contains(ty) {
                ordered.push(ty.clone());
            }
        }
        ordered
    }
}

impl fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaintenanceType::Preventive => write!(f, "PREVENTIVE"),
            MaintenanceType::ConditionBased => write!(f, "CONDITION_BASED"),
            MaintenanceType::ScheduledCorrective => write!(f, "SCHEDULED_CORRECTIVE"),
            MaintenanceType::EmergencyCorrective => write!(f, "EMERGENCY_CORRECTIVE"),
            MaintenanceType::SystemImprovement => write!(f, "SYSTEM_IMPROVEMENT"),
            MaintenanceType::Other(label) => write!(f, "{}", label),
        }
    }
}

// ==========================================
// Event status
// ==========================================
// Only COMPLETED records participate in analysis; the normalizer drops
// everything else before any metric is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Completed,
    Other(String),
}

impl EventStatus {
    /// Map a source label to a status. The sheet uses "CULMINADO";
    /// the canonical English "COMPLETED" is accepted as well.
    pub fn from_source(value: &str) -> Self {
        let upper = value.trim().to_uppercase();
        match upper.as_str() {
            "CULMINADO" | "COMPLETED" => EventStatus::Completed,
            _ => EventStatus::Other(upper),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, EventStatus::Completed)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Completed => write!(f, "COMPLETED"),
            EventStatus::Other(label) => write!(f, "{}", label),
        }
    }
}

// ==========================================
// ISO week bucket key
// ==========================================
// Field order (year, week) makes the derived Ord match the numeric sort
// key, so buckets sort correctly across year boundaries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    /// Build the bucket key from the ISO calendar week of a date.
    pub fn from_date(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        WeekKey {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Chart label, e.g. "2025-S07".
    pub fn label(&self) -> String {
        format!("{}-S{:02}", self.year, self.week)
    }

    /// Numeric composite for explicit sorting (year*100 + week).
    pub fn sort_key(&self) -> i64 {
        self.year as i64 * 100 + self.week as i64
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
