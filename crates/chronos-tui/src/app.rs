use chrono::{DateTime, Local, Utc};

use chronos_core::models::{ActivityItem, ReportEntry, ReportMonth, TaskGrid, TimeEntry};
use chronos_core::services::duration;
use chronos_core::services::tracker::TimeTracker;

/// Shown in the edited cell after a failed remote write.
pub const FAILED_PLACEHOLDER: &str = "failed";

/// The edit-session mode determines how keys are dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditSession {
    Idle,
    EditingCell {
        buffer: String,
        /// The buffer holds [`FAILED_PLACEHOLDER`] rather than user input.
        failed: bool,
    },
    AddingTask {
        buffer: String,
    },
}

impl EditSession {
    pub fn is_idle(&self) -> bool {
        matches!(self, EditSession::Idle)
    }
}

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Grid,
    Log,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Selected (task row, day column), both zero-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub task: usize,
    pub day: usize,
}

// ─── Log Buffer ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn render(&self) -> String {
        let level = match self.level {
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
        };
        format!("[{}] {level}: {}", self.at.format("%H:%M:%S"), self.message)
    }
}

/// Append-only session log with a scroll position measured from the latest line.
#[derive(Debug, Default)]
pub struct LogBuffer {
    entries: Vec<LogEntry>,
    scroll_back: usize,
}

impl LogBuffer {
    /// Lines moved by Page Up / Page Down.
    pub const PAGE: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        self.entries.push(LogEntry {
            at: Local::now(),
            level,
            message: message.into(),
        });
        self.scroll_back = 0;
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "log_error");
        self.push(LogLevel::Error, message);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn is_following(&self) -> bool {
        self.scroll_back == 0
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let max = self.entries.len().saturating_sub(1);
        self.scroll_back = (self.scroll_back + lines).min(max);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    /// Index of the first line to show in a viewport of `height` lines.
    pub fn first_visible(&self, height: usize) -> usize {
        self.entries
            .len()
            .saturating_sub(height + self.scroll_back)
    }
}

// ─── Activity Panels ───────────────────────────────────────────────────

/// Read-only feed contents shown in one of the top panels.
#[derive(Debug, Clone, Default)]
pub struct ActivityPanel {
    pub items: Vec<ActivityItem>,
    /// Shown when `items` is empty.
    pub empty_message: String,
}

impl ActivityPanel {
    pub fn new(empty_message: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            empty_message: empty_message.into(),
        }
    }
}

// ─── Main App State ────────────────────────────────────────────────────

/// All mutable report state, owned by the single event-loop task.
pub struct App {
    pub month: ReportMonth,
    pub project_id: String,
    pub grid: TaskGrid,
    pub cursor: Cursor,
    pub session: EditSession,
    pub focus: Panel,
    pub log: LogBuffer,
    pub linear_activity: ActivityPanel,
    pub git_activity: ActivityPanel,
    pub should_quit: bool,
}

impl App {
    pub fn new(month: ReportMonth, project_id: impl Into<String>) -> Self {
        Self {
            month,
            project_id: project_id.into(),
            grid: TaskGrid::new(),
            cursor: Cursor::default(),
            session: EditSession::Idle,
            focus: Panel::Grid,
            log: LogBuffer::new(),
            linear_activity: ActivityPanel::new("No recent Linear activity found"),
            git_activity: ActivityPanel::new("No recent Git activity found"),
            should_quit: false,
        }
    }

    /// Rebuild the grid wholesale from a fetch result.
    pub fn load_entries(&mut self, entries: &[ReportEntry]) {
        self.grid = TaskGrid::from_entries(entries);
        self.clamp_cursor();
    }

    pub fn day_count(&self) -> usize {
        self.month.day_count() as usize
    }

    /// The selected (task, day-of-month), if the grid has any rows.
    pub fn selected_cell(&self) -> Option<(String, u32)> {
        let task = self.grid.task(self.cursor.task)?;
        let day = self.month.days().get(self.cursor.day).copied()?;
        Some((task.to_string(), day))
    }

    fn clamp_cursor(&mut self) {
        let tasks = self.grid.tasks().len();
        self.cursor.task = self.cursor.task.min(tasks.saturating_sub(1));
        self.cursor.day = self.cursor.day.min(self.day_count().saturating_sub(1));
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Switch keyboard focus; only allowed while idle.
    pub fn focus_panel(&mut self, panel: Panel) {
        if self.session.is_idle() {
            self.focus = panel;
        }
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        if !self.session.is_idle() || self.grid.tasks().is_empty() {
            return;
        }
        let last_task = self.grid.tasks().len().saturating_sub(1);
        let last_day = self.day_count().saturating_sub(1);
        match direction {
            Direction::Up => self.cursor.task = self.cursor.task.saturating_sub(1),
            Direction::Down => self.cursor.task = (self.cursor.task + 1).min(last_task),
            Direction::Left => self.cursor.day = self.cursor.day.saturating_sub(1),
            Direction::Right => self.cursor.day = (self.cursor.day + 1).min(last_day),
        }
    }

    // ─── Cell Editing ──────────────────────────────────────────────────

    pub fn begin_edit(&mut self) {
        if !self.session.is_idle() {
            return;
        }
        let Some((task, day)) = self.selected_cell() else {
            return;
        };
        let buffer = self
            .grid
            .duration(&task, day)
            .filter(|d| !d.is_zero())
            .map(duration::format)
            .unwrap_or_default();
        tracing::debug!(%task, day, %buffer, "begin_edit");
        self.session = EditSession::EditingCell {
            buffer,
            failed: false,
        };
    }

    pub fn edit_push(&mut self, c: char) {
        if let EditSession::EditingCell { buffer, failed } = &mut self.session {
            if *failed {
                buffer.clear();
                *failed = false;
            }
            buffer.push(c);
        }
    }

    pub fn edit_backspace(&mut self) {
        if let EditSession::EditingCell { buffer, failed } = &mut self.session {
            if *failed {
                buffer.clear();
                *failed = false;
            } else {
                buffer.pop();
            }
        }
    }

    /// Leave edit mode, persisting the buffer remotely.
    ///
    /// The grid is written before the remote call; a failed call is only
    /// reported, never rolled back.
    pub async fn commit_edit(&mut self, tracker: &dyn TimeTracker) {
        let EditSession::EditingCell { buffer, failed } = &self.session else {
            return;
        };
        let buffer = buffer.trim().to_string();
        if *failed {
            self.session = EditSession::Idle;
            return;
        }
        let Some((task, day)) = self.selected_cell() else {
            self.session = EditSession::Idle;
            return;
        };

        if buffer.is_empty() {
            self.session = EditSession::Idle;
            if let Some(id) = self.grid.remote_id(&task, day) {
                let message = format!(
                    "Empty value ignored; entry {id} for '{task}' on day {day} was kept (Ctrl+D deletes it)"
                );
                self.log.info(message);
            }
            return;
        }

        let parsed = match duration::parse(&buffer) {
            Ok(d) if d.is_zero() => {
                self.log.error("Duration must be greater than zero");
                self.session = EditSession::Idle;
                return;
            }
            Ok(d) => d,
            Err(_) => {
                self.log.error(format!("Invalid duration format: {buffer}"));
                self.session = EditSession::Idle;
                return;
            }
        };

        let Some(at) = self.month.timestamp_for(day, Utc::now().time()) else {
            self.session = EditSession::Idle;
            return;
        };
        let entry = TimeEntry::new(task.clone(), at, parsed, self.project_id.clone());
        let existing_id = self.grid.remote_id(&task, day).map(str::to_string);
        let shown = duration::format(parsed);
        let date = at.format("%Y-%m-%d");

        self.grid.set_duration(&task, day, parsed);

        let outcome = match existing_id {
            Some(id) => {
                self.log.info(format!(
                    "Attempting to update existing entry (ID {id}): {shown} for '{task}' on {date}"
                ));
                match tracker.update_entry(&id, &entry).await {
                    Ok(()) => {
                        self.log.info(format!(
                            "Successfully updated {shown} for {task} on day {day} (ID: {id})"
                        ));
                        Ok(())
                    }
                    Err(e) => Err(format!("Failed to update time entry: {e}")),
                }
            }
            None => {
                self.log.info(format!(
                    "Attempting to log new entry: {shown} for '{task}' on {date}"
                ));
                match tracker.create_entry(&entry).await {
                    Ok(id) => {
                        self.grid.set_remote_id(&task, day, id.clone());
                        self.log.info(format!(
                            "Successfully logged {shown} for {task} on day {day} (ID: {id})"
                        ));
                        Ok(())
                    }
                    Err(e) => Err(format!("Failed to save time entry: {e}")),
                }
            }
        };

        match outcome {
            Ok(()) => self.session = EditSession::Idle,
            Err(message) => {
                tracing::warn!(%task, day, %message, "commit_failed");
                self.log.error(message);
                self.session = EditSession::EditingCell {
                    buffer: FAILED_PLACEHOLDER.to_string(),
                    failed: true,
                };
            }
        }
    }

    /// Leave edit or add-task mode without touching the grid.
    pub fn cancel_edit(&mut self) {
        match self.session {
            EditSession::Idle => {}
            EditSession::EditingCell { .. } => {
                self.session = EditSession::Idle;
                self.log.info("Edit cancelled");
            }
            EditSession::AddingTask { .. } => self.cancel_add_task(),
        }
    }

    // ─── Remote Operations ─────────────────────────────────────────────

    /// Delete the selected cell's remote entry, then drop it locally.
    pub async fn delete_entry(&mut self, tracker: &dyn TimeTracker) {
        if !self.session.is_idle() {
            return;
        }
        let Some((task, day)) = self.selected_cell() else {
            return;
        };
        let Some(id) = self.grid.remote_id(&task, day).map(str::to_string) else {
            self.log.error("No time entry to delete at this position");
            return;
        };
        let shown = duration::format(self.grid.duration(&task, day).unwrap_or_default());

        self.log.info(format!(
            "Attempting to delete entry (ID {id}): {shown} for '{task}' on day {day}"
        ));
        match tracker.delete_entry(&id).await {
            Ok(()) => {
                self.grid.remove(&task, day);
                self.log
                    .info(format!("Successfully deleted {shown} for {task} on day {day}"));
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "delete_failed");
                self.log.error(format!("Failed to delete time entry: {e}"));
            }
        }
    }

    /// Re-fetch the whole month and rebuild the grid.
    pub async fn refresh(&mut self, tracker: &dyn TimeTracker) {
        if !self.session.is_idle() {
            return;
        }
        self.log.info("Refreshing data...");
        let (from, to) = self.month.range();
        match tracker.fetch_entries(from, to).await {
            Ok(entries) => {
                self.load_entries(&entries);
                self.log.info(format!(
                    "Data refreshed successfully - found {} time entries",
                    entries.len()
                ));
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh_failed");
                self.log.error(format!("Failed to refresh data: {e}"));
            }
        }
    }

    // ─── Add Task ──────────────────────────────────────────────────────

    pub fn begin_add_task(&mut self) {
        if !self.session.is_idle() {
            return;
        }
        self.session = EditSession::AddingTask {
            buffer: String::new(),
        };
        self.log
            .info("Enter new task name (press Enter to confirm, Esc to cancel)");
    }

    pub fn task_push(&mut self, c: char) {
        if let EditSession::AddingTask { buffer } = &mut self.session {
            buffer.push(c);
        }
    }

    pub fn task_backspace(&mut self) {
        if let EditSession::AddingTask { buffer } = &mut self.session {
            buffer.pop();
        }
    }

    pub fn confirm_add_task(&mut self) {
        let EditSession::AddingTask { buffer } = &self.session else {
            return;
        };
        let name = buffer.trim().to_string();
        self.session = EditSession::Idle;

        if name.is_empty() {
            self.log.error("Task name cannot be empty");
            return;
        }
        match self.grid.add_task(&name) {
            Some(row) => {
                self.cursor = Cursor { task: row, day: 0 };
                self.focus = Panel::Grid;
                self.log.info(format!("Added new task: '{name}'"));
            }
            None => self.log.error(format!("Task '{name}' already exists")),
        }
    }

    pub fn cancel_add_task(&mut self) {
        if matches!(self.session, EditSession::AddingTask { .. }) {
            self.session = EditSession::Idle;
            self.log.info("Add new task cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_scroll_is_clamped_and_append_follows() {
        let mut log = LogBuffer::new();
        for i in 0..10 {
            log.info(format!("line {i}"));
        }
        assert_eq!(log.first_visible(4), 6);
        log.scroll_up(3);
        assert!(!log.is_following());
        assert_eq!(log.first_visible(4), 3);
        log.scroll_up(100);
        assert_eq!(log.first_visible(4), 0);
        log.scroll_down(100);
        assert!(log.is_following());
        log.scroll_up(2);
        log.error("boom");
        assert!(log.is_following());
    }

    #[test]
    fn log_entry_render_has_level_and_stamp() {
        let mut log = LogBuffer::new();
        log.error("Task 'x' already exists");
        let line = log.last().unwrap().render();
        assert!(line.starts_with('['));
        assert!(line.ends_with("] ERROR: Task 'x' already exists"));
    }
}
