use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};

/// Terminals at least this tall get the activity panels and help bar.
pub const FULL_LAYOUT_MIN_HEIGHT: u16 = 60;

const HELP_HEIGHT: u16 = 2;
const FULL_LOG_HEIGHT: u16 = 6;
const COMPACT_LOG_HEIGHT: u16 = 5;

/// Panel rectangles for one frame. Optional panels exist only in the full layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    pub linear: Option<Rect>,
    pub git: Option<Rect>,
    pub grid: Rect,
    pub log: Rect,
    pub help: Option<Rect>,
}

pub fn compute_panels(area: Rect) -> Panels {
    if area.height >= FULL_LAYOUT_MIN_HEIGHT {
        full_layout(area)
    } else {
        compact_layout(area)
    }
}

/// [linear | git] / [grid] / [log] / [help]
fn full_layout(area: Rect) -> Panels {
    let top = (area.height / 3).max(3);
    let remaining = area.height.saturating_sub(top);
    let log = FULL_LOG_HEIGHT.min(remaining.saturating_sub(HELP_HEIGHT) / 2);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(top),
            Constraint::Min(0),
            Constraint::Length(log),
            Constraint::Length(HELP_HEIGHT),
        ])
        .split(area);

    let activity = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    Panels {
        linear: Some(activity[0]),
        git: Some(activity[1]),
        grid: rows[1],
        log: rows[2],
        help: Some(rows[3]),
    }
}

/// [grid] / [log]
fn compact_layout(area: Rect) -> Panels {
    let log = COMPACT_LOG_HEIGHT.min(area.height / 2);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(log)])
        .split(area);

    Panels {
        linear: None,
        git: None,
        grid: rows[0],
        log: rows[1],
        help: None,
    }
}

/// A fixed-size popup centered in `area`, shrunk to fit if needed.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Border color for a panel that may hold keyboard focus.
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
