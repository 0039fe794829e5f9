// ==========================================
// Maintenance KPI Engine - Filter Engine
// ==========================================
// Responsibility: narrow a record set by equipment / assembly /
// technical location / start-date range. Stateless pure functions;
// never errors, never mutates the input.
// ==========================================

use crate::domain::event::MaintenanceEvent;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel selection meaning "no restriction" on a dimension.
pub const SELECT_ALL: &str = "all";

// ==========================================
// Filter predicates
// ==========================================
// None on a dimension means unrestricted. Equality is compared on the
// string representation of the field, so numeric-looking identifiers
// match regardless of their original cell type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventFilter {
    pub equipment: Option<String>,
    pub assembly: Option<String>,
    pub technical_location: Option<String>,
    /// Inclusive range over the date component of `start_date`.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl EventFilter {
    /// Map a UI selection to a predicate: the sentinel ("all", or the
    /// sheet's "Todos") means no restriction.
    pub fn selection(value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(SELECT_ALL) || trimmed.eq_ignore_ascii_case("todos") {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

// ==========================================
// FilterEngine
// ==========================================
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    /// Apply the filter predicates, returning a new record set.
    ///
    /// An empty result is a normal outcome, not an error. Records without
    /// a start date fail any date-range predicate.
    pub fn apply(&self, events: &[MaintenanceEvent], filter: &EventFilter) -> Vec<MaintenanceEvent> {
        events
            .iter()
            .filter(|event| self.matches(event, filter))
            .cloned()
            .collect()
    }

    fn matches(&self, event: &MaintenanceEvent, filter: &EventFilter) -> bool {
        if let Some(equipment) = &filter.equipment {
            if &event.equipment != equipment {
                return false;
            }
        }
        if let Some(assembly) = &filter.assembly {
            if &event.assembly != assembly {
                return false;
            }
        }
        if let Some(location) = &filter.technical_location {
            match &event.technical_location {
                Some(value) if value == location => {}
                _ => return false,
            }
        }
        if let Some((from, to)) = filter.date_range {
            match event.start_date {
                Some(date) if date >= from && date <= to => {}
                _ => return false,
            }
        }
        true
    }

    // ==========================================
    // Filter-option providers (for the selection UI)
    // ==========================================

    /// Distinct equipment identifiers, sorted.
    pub fn equipment_options(&self, events: &[MaintenanceEvent]) -> Vec<String> {
        Self::distinct_sorted(events.iter().map(|e| Some(e.equipment.clone())))
    }

    /// Distinct assembly identifiers, sorted.
    pub fn assembly_options(&self, events: &[MaintenanceEvent]) -> Vec<String> {
        Self::distinct_sorted(events.iter().map(|e| Some(e.assembly.clone())))
    }

    /// Distinct technical locations, sorted; absent values skipped.
    pub fn location_options(&self, events: &[MaintenanceEvent]) -> Vec<String> {
        Self::distinct_sorted(events.iter().map(|e| e.technical_location.clone()))
    }

    /// Min/max start date of the loaded set, for the date-range pickers.
    pub fn date_bounds(&self, events: &[MaintenanceEvent]) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = events.iter().filter_map(|e| e.start_date);
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d)));
        Some((min, max))
    }

    fn distinct_sorted<I: IntoIterator<Item = Option<String>>>(values: I) -> Vec<String> {
        let mut out: Vec<String> = values
            .into_iter()
            .flatten()
            .filter(|v| !v.is_empty())
            .collect();
        out.sort();
        out.dedup();
        out
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::MaintenanceType;

    fn event(equipment: &str, assembly: &str, start: Option<NaiveDate>) -> MaintenanceEvent {
        MaintenanceEvent {
            equipment: equipment.to_string(),
            assembly: assembly.to_string(),
            technical_location: Some("PLANTA-A".to_string()),
            maintenance_type: MaintenanceType::Preventive,
            start_date: start,
            end_date: start,
            start_time: None,
            end_time: None,
            production_affected: false,
            scheduled_duration_min: 0.0,
            available_time_min: 0.0,
            real_repair_time_min: 0.0,
            fault_correction_time_min: 0.0,
            downtime_min: 0.0,
            overtime_min: 0.0,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_selection_sentinel() {
        assert_eq!(EventFilter::selection("all"), None);
        assert_eq!(EventFilter::selection("Todos"), None);
        assert_eq!(
            EventFilter::selection("BOMBA-01"),
            Some("BOMBA-01".to_string())
        );
    }

    #[test]
    fn test_filter_by_equipment() {
        let engine = FilterEngine::new();
        let events = vec![
            event("A", "X", Some(date(2025, 2, 10))),
            event("B", "X", Some(date(2025, 2, 11))),
        ];
        let filter = EventFilter {
            equipment: Some("A".to_string()),
            ..Default::default()
        };

        let filtered = engine.apply(&events, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].equipment, "A");
    }

    #[test]
    fn test_date_range_inclusive_both_ends() {
        let engine = FilterEngine::new();
        let events = vec![
            event("A", "X", Some(date(2025, 2, 10))),
            event("B", "X", Some(date(2025, 2, 12))),
            event("C", "X", Some(date(2025, 2, 14))),
        ];
        let filter = EventFilter {
            date_range: Some((date(2025, 2, 10), date(2025, 2, 12))),
            ..Default::default()
        };

        let filtered = engine.apply(&events, &filter);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_date_range_excludes_missing_start_date() {
        let engine = FilterEngine::new();
        let events = vec![event("A", "X", None)];
        let filter = EventFilter {
            date_range: Some((date(2025, 1, 1), date(2025, 12, 31))),
            ..Default::default()
        };

        assert!(engine.apply(&events, &filter).is_empty());
    }

    #[test]
    fn test_filter_idempotent() {
        let engine = FilterEngine::new();
        let events = vec![
            event("A", "X", Some(date(2025, 2, 10))),
            event("A", "Y", Some(date(2025, 2, 11))),
            event("B", "X", Some(date(2025, 2, 12))),
        ];
        let filter = EventFilter {
            equipment: Some("A".to_string()),
            date_range: Some((date(2025, 2, 10), date(2025, 2, 11))),
            ..Default::default()
        };

        let once = engine.apply(&events, &filter);
        let twice = engine.apply(&once, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_match_yields_empty_not_error() {
        let engine = FilterEngine::new();
        let events = vec![event("A", "X", Some(date(2025, 2, 10)))];
        let filter = EventFilter {
            equipment: Some("Z".to_string()),
            ..Default::default()
        };

        assert!(engine.apply(&events, &filter).is_empty());
    }

    #[test]
    fn test_options_distinct_and_sorted() {
        let engine = FilterEngine::new();
        let events = vec![
            event("B", "Y", Some(date(2025, 2, 10))),
            event("A", "X", Some(date(2025, 2, 12))),
            event("B", "X", None),
        ];

        assert_eq!(engine.equipment_options(&events), vec!["A", "B"]);
        assert_eq!(engine.assembly_options(&events), vec!["X", "Y"]);
        assert_eq!(engine.location_options(&events), vec!["PLANTA-A"]);
        assert_eq!(
            engine.date_bounds(&events),
            Some((date(2025, 2, 10), date(2025, 2, 12)))
        );
    }
}
