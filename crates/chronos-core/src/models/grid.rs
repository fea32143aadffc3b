use std::collections::BTreeMap;
use std::time::Duration;

use super::entry::ReportEntry;

/// Task name used for entries fetched with an empty description.
pub const UNNAMED_TASK: &str = "Unnamed Task";

/// The task × day matrix of a report month.
///
/// Holds logged durations, the remote identifier of each persisted cell, and
/// the sorted list of known task names. A cell with no entry is absent, not
/// zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskGrid {
    durations: BTreeMap<String, BTreeMap<u32, Duration>>,
    remote_ids: BTreeMap<String, BTreeMap<u32, String>>,
    tasks: Vec<String>,
}

impl TaskGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group fetched entries by task and day.
    ///
    /// Durations of same-day duplicates are summed and the last identifier
    /// is kept, so every (task, day) maps to at most one remote entry.
    pub fn from_entries(entries: &[ReportEntry]) -> Self {
        let mut grid = Self::new();
        for entry in entries {
            let Some(duration) = entry.duration() else {
                tracing::debug!(id = %entry.id, "skipping entry without a closed interval");
                continue;
            };
            let task = if entry.description.is_empty() {
                UNNAMED_TASK.to_string()
            } else {
                entry.description.clone()
            };
            let day = entry.day();

            let cell = grid
                .durations
                .entry(task.clone())
                .or_default()
                .entry(day)
                .or_default();
            *cell = cell.saturating_add(duration);
            grid.remote_ids
                .entry(task.clone())
                .or_default()
                .insert(day, entry.id.clone());
        }
        grid.tasks = grid.durations.keys().cloned().collect();
        grid
    }

    /// Task names in display order.
    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    pub fn task(&self, index: usize) -> Option<&str> {
        self.tasks.get(index).map(String::as_str)
    }

    pub fn contains_task(&self, name: &str) -> bool {
        self.tasks.iter().any(|t| t == name)
    }

    /// Insert a new task in sorted position and return its row index.
    /// Returns `None` if the name is already present.
    pub fn add_task(&mut self, name: &str) -> Option<usize> {
        match self.tasks.binary_search_by(|t| t.as_str().cmp(name)) {
            Ok(_) => None,
            Err(index) => {
                self.tasks.insert(index, name.to_string());
                self.durations.entry(name.to_string()).or_default();
                self.remote_ids.entry(name.to_string()).or_default();
                Some(index)
            }
        }
    }

    pub fn duration(&self, task: &str, day: u32) -> Option<Duration> {
        self.durations.get(task)?.get(&day).copied()
    }

    pub fn remote_id(&self, task: &str, day: u32) -> Option<&str> {
        self.remote_ids.get(task)?.get(&day).map(String::as_str)
    }

    pub fn set_duration(&mut self, task: &str, day: u32, duration: Duration) {
        self.durations
            .entry(task.to_string())
            .or_default()
            .insert(day, duration);
    }

    pub fn set_remote_id(&mut self, task: &str, day: u32, id: impl Into<String>) {
        self.remote_ids
            .entry(task.to_string())
            .or_default()
            .insert(day, id.into());
    }

    /// Remove the cell's duration and remote identifier together.
    pub fn remove(&mut self, task: &str, day: u32) {
        if let Some(days) = self.durations.get_mut(task) {
            days.remove(&day);
        }
        if let Some(days) = self.remote_ids.get_mut(task) {
            days.remove(&day);
        }
    }

    pub fn task_total(&self, task: &str) -> Duration {
        self.durations
            .get(task)
            .map(|days| saturating_sum(days.values()))
            .unwrap_or_default()
    }

    pub fn day_total(&self, day: u32) -> Duration {
        saturating_sum(self.durations.values().filter_map(|days| days.get(&day)))
    }

    pub fn grand_total(&self) -> Duration {
        saturating_sum(self.durations.values().flat_map(|days| days.values()))
    }

    /// Number of persisted cells.
    pub fn entry_count(&self) -> usize {
        self.remote_ids.values().map(BTreeMap::len).sum()
    }
}

fn saturating_sum<'a>(durations: impl Iterator<Item = &'a Duration>) -> Duration {
    durations.fold(Duration::ZERO, |acc, d| acc.saturating_add(*d))
}
