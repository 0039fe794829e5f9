// ==========================================
// Maintenance KPI Engine - Data Source Layer
// ==========================================
// Responsibility: raw tabular rows in, refreshed snapshot out. The
// remote spreadsheet connector lives outside this crate; anything that
// can hand over header-keyed rows plugs in through RecordSource.
// A fetch failure degrades to an empty record set - the engines then
// answer "no data" instead of erroring.
// ==========================================

use crate::domain::event::MaintenanceEvent;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::normalizer::RecordNormalizer;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// One raw tabular record set: header-keyed cell values, one map per row.
pub type RawTable = Vec<HashMap<String, String>>;

/// A provider of raw maintenance-order rows.
pub trait RecordSource {
    fn fetch(&self) -> ImportResult<RawTable>;
}

// ==========================================
// CSV-backed source
// ==========================================
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for CsvSource {
    fn fetch(&self) -> ImportResult<RawTable> {
        if !self.path.exists() {
            return Err(ImportError::FileNotFound(
                self.path.display().to_string(),
            ));
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let headers = reader.headers()?.clone();

        let mut rows: RawTable = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: HashMap<String, String> = headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect();
            rows.push(row);
        }
        Ok(rows)
    }
}

// ==========================================
// Snapshot
// ==========================================
// The most-recently-fetched record set plus its refresh timestamp - the
// only process-wide state around the otherwise stateless engines.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub events: Vec<MaintenanceEvent>,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Fetch and normalize one refresh.
    ///
    /// Source failure is absorbed: the snapshot carries an empty record
    /// set and the collaborator surfaces the warning to the user.
    pub fn load(source: &dyn RecordSource, normalizer: &RecordNormalizer) -> Snapshot {
        let events = match source.fetch() {
            Ok(rows) => {
                let events = normalizer.normalize(&rows);
                info!(
                    raw_rows = rows.len(),
                    completed_events = events.len(),
                    "data refresh loaded"
                );
                events
            }
            Err(err) => {
                warn!(error = %err, "data source fetch failed, continuing with an empty record set");
                Vec::new()
            }
        };

        Snapshot {
            events,
            fetched_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
