// Each test binary compiles this module independently and uses a different
// subset of helpers, so unused-function warnings are expected.
#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

use chronos_core::error::{ChronosError, Result};
use chronos_core::models::{ReportEntry, ReportMonth, TimeEntry};
use chronos_core::services::tracker::TimeTracker;
use chronos_tui::app::App;
use chronos_tui::ui;

/// Render the app to a string using a TestBackend of the given dimensions.
pub fn render_to_string(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| ui::render(f, app)).unwrap();
    terminal.backend().to_string()
}

/// One adapter call seen by [`FakeTracker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch,
    Create { task: String, duration: Duration },
    Update { id: String, duration: Duration },
    Delete { id: String },
}

/// In-memory `TimeTracker` that records calls and can be told to fail.
#[derive(Default)]
pub struct FakeTracker {
    pub calls: Mutex<Vec<Call>>,
    pub entries: Mutex<Vec<ReportEntry>>,
    pub fail: bool,
    next_id: Mutex<u32>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_entries(entries: Vec<ReportEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(ChronosError::Api {
                status: 503,
                body: "service unavailable".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TimeTracker for FakeTracker {
    async fn fetch_entries(
        &self,
        _from: DateTime<Utc>,
        _to: DateTime<Utc>,
    ) -> Result<Vec<ReportEntry>> {
        self.record(Call::Fetch)?;
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn create_entry(&self, entry: &TimeEntry) -> Result<String> {
        self.record(Call::Create {
            task: entry.description.clone(),
            duration: entry.duration,
        })?;
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        Ok(format!("new-{}", *next))
    }

    async fn update_entry(&self, id: &str, entry: &TimeEntry) -> Result<()> {
        self.record(Call::Update {
            id: id.to_string(),
            duration: entry.duration,
        })
    }

    async fn delete_entry(&self, id: &str) -> Result<()> {
        self.record(Call::Delete { id: id.to_string() })
    }
}

pub fn february() -> ReportMonth {
    ReportMonth::new(2026, 2).unwrap()
}

/// A fetched entry on `day` of February 2026 starting at 09:00 UTC.
pub fn entry(id: &str, task: &str, day: u32, minutes: i64) -> ReportEntry {
    let start = Utc.with_ymd_and_hms(2026, 2, day, 9, 0, 0).unwrap();
    ReportEntry {
        id: id.to_string(),
        description: task.to_string(),
        start,
        end: Some(start + chrono::TimeDelta::minutes(minutes)),
    }
}

pub fn minutes(m: u64) -> Duration {
    Duration::from_secs(m * 60)
}

/// February 2026 app loaded with the given entries.
pub fn app_with(entries: &[ReportEntry]) -> App {
    let mut app = App::new(february(), "proj-1");
    app.load_entries(entries);
    app
}

/// Two tasks: "Build" (day 5 → 1h, id b5) and "Review" (day 2 → 30m, id r2).
pub fn sample_app() -> App {
    app_with(&[entry("b5", "Build", 5, 60), entry("r2", "Review", 2, 30)])
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn chars(text: &str) -> Vec<KeyEvent> {
    text.chars().map(|c| key(KeyCode::Char(c))).collect()
}
