use std::time::Duration;

use chrono::{DateTime, Datelike, Utc};

/// A time entry to be written to the time-tracking service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    /// Remote identifier, `None` until persisted.
    pub id: Option<String>,
    pub description: String,
    /// Reference timestamp on the target day; the adapter derives the
    /// start/end window from it.
    pub at: DateTime<Utc>,
    pub duration: Duration,
    pub project_id: String,
}

impl TimeEntry {
    pub fn new(
        description: impl Into<String>,
        at: DateTime<Utc>,
        duration: Duration,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            description: description.into(),
            at,
            duration,
            project_id: project_id.into(),
        }
    }
}

/// A persisted entry as returned by a range fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub id: String,
    pub description: String,
    pub start: DateTime<Utc>,
    /// `None` while a timer is still running.
    pub end: Option<DateTime<Utc>>,
}

impl ReportEntry {
    pub fn day(&self) -> u32 {
        self.start.day()
    }

    /// `end - start`, or `None` for running or inverted intervals.
    pub fn duration(&self) -> Option<Duration> {
        self.end.and_then(|end| (end - self.start).to_std().ok())
    }
}

/// One line of a read-only activity feed (issue tracker, source control).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    pub timestamp: Option<DateTime<Utc>>,
    pub label: String,
    pub title: String,
}

impl ActivityItem {
    pub fn summary(&self) -> String {
        let when = self
            .timestamp
            .map(|t| t.format("%b %-d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        format!("{when} | {:<12} | {}", self.label, self.title)
    }
}
