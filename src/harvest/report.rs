//! Harvest run statistics

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Counters for one harvest run
#[derive(Debug, Clone, Serialize)]
pub struct HarvestReport {
    /// Parents returned by the listing stage
    pub farms_listed: usize,
    /// Parents that resolved to an identifier
    pub resolved: usize,
    /// Parents with no child records
    pub skipped: usize,
    /// Payloads fetched in stage 2
    pub fetched: usize,
    /// CSV data rows written
    pub rows_written: usize,
    /// Files written
    pub files_written: usize,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the run
    pub duration_ms: u64,
}

impl HarvestReport {
    /// Start an empty report stamped with the current time
    pub fn new() -> Self {
        Self {
            farms_listed: 0,
            resolved: 0,
            skipped: 0,
            fetched: 0,
            rows_written: 0,
            files_written: 0,
            started_at: Utc::now(),
            duration_ms: 0,
        }
    }

    /// Record the run's wall-clock duration
    #[must_use]
    pub fn finish(mut self, elapsed: Duration) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        {
            self.duration_ms = elapsed.as_millis() as u64;
        }
        self
    }
}

impl Default for HarvestReport {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for HarvestReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} farms listed, {} resolved ({} skipped), {} fetched, {} rows, {} files in {}ms",
            self.farms_listed,
            self.resolved,
            self.skipped,
            self.fetched,
            self.rows_written,
            self.files_written,
            self.duration_ms
        )
    }
}
