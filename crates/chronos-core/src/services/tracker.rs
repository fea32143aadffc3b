use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{ActivityItem, ReportEntry, TimeEntry};

/// Remote time-tracking service the report grid synchronizes with.
#[async_trait]
pub trait TimeTracker: Send + Sync {
    /// Entries overlapping `[from, to]`.
    async fn fetch_entries(&self, from: DateTime<Utc>, to: DateTime<Utc>)
        -> Result<Vec<ReportEntry>>;

    /// Create a billable entry and return its remote identifier.
    async fn create_entry(&self, entry: &TimeEntry) -> Result<String>;

    /// Replace an existing entry.
    async fn update_entry(&self, id: &str, entry: &TimeEntry) -> Result<()>;

    async fn delete_entry(&self, id: &str) -> Result<()>;
}

/// Read-only recent-activity source shown next to the grid.
#[async_trait]
pub trait ActivityFeed: Send + Sync {
    async fn last_activity(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ActivityItem>>;
}
