//! Fixed-width text rendering of the task × day grid.
//!
//! Produces plain monospace text with no terminal styling so the same output
//! can be shown in the grid panel or compared in tests.

use std::time::Duration;

use chronos_core::models::{ReportMonth, TaskGrid};
use chronos_core::services::duration;

use crate::app::{Cursor, EditSession};

pub const TASK_COLUMN_WIDTH: usize = 35;
pub const DAY_COLUMN_WIDTH: usize = 8;
pub const COLUMN_SEPARATOR: &str = " | ";
/// Width of the task-name and Total columns plus the separator.
pub const FROZEN_WIDTH: usize = TASK_COLUMN_WIDTH + DAY_COLUMN_WIDTH + COLUMN_SEPARATOR.len();
/// Lines above the first task row.
pub const HEADER_LINES: usize = 3;

const WEEKEND_PLACEHOLDER: &str = "x";
const EMPTY_CELL: &str = "-";
const ELLIPSIS: &str = "...";

/// Render the whole month as lines of text.
///
/// The selected cell is wrapped in `>...<`, or shows the edit buffer as
/// `[...]` while a cell edit is in progress.
pub fn render_table(
    grid: &TaskGrid,
    month: &ReportMonth,
    cursor: Cursor,
    session: &EditSession,
) -> String {
    let days = month.days();
    let mut lines = Vec::with_capacity(grid.tasks().len() + HEADER_LINES + 2);

    let mut day_numbers = frozen("", "Total");
    let mut weekdays = frozen("Task", "");
    for &day in &days {
        day_numbers.push_str(&cell(&day.to_string()));
        let name = month
            .weekday(day)
            .map(|w| w.to_string().chars().take(3).collect::<String>())
            .unwrap_or_default();
        weekdays.push_str(&cell(&name));
    }
    lines.push(day_numbers);
    lines.push(weekdays);
    lines.push(separator(days.len()));

    for (row, task) in grid.tasks().iter().enumerate() {
        let mut line = frozen(&task_label(task), &total_label(grid.task_total(task)));
        for (column, &day) in days.iter().enumerate() {
            let selected = cursor.task == row && cursor.day == column;
            let content = match session {
                EditSession::EditingCell { buffer, .. } if selected => format!("[{buffer}]"),
                _ => {
                    let value = match grid.duration(task, day).filter(|d| !d.is_zero()) {
                        Some(d) => duration::format(d),
                        None => empty_label(month, day).to_string(),
                    };
                    if selected {
                        format!(">{value}<")
                    } else {
                        value
                    }
                }
            };
            line.push_str(&cell(&content));
        }
        lines.push(line);
    }

    lines.push(separator(days.len()));
    let mut totals = frozen("TOTAL", &total_label(grid.grand_total()));
    for &day in &days {
        let total = grid.day_total(day);
        let content = if total.is_zero() {
            empty_label(month, day).to_string()
        } else {
            duration::format(total)
        };
        totals.push_str(&cell(&content));
    }
    lines.push(totals);

    lines.join("\n")
}

fn frozen(task: &str, total: &str) -> String {
    format!(
        "{task:<width$}{}{COLUMN_SEPARATOR}",
        cell(total),
        width = TASK_COLUMN_WIDTH
    )
}

fn separator(day_count: usize) -> String {
    format!(
        "{}─┼─{}",
        "─".repeat(TASK_COLUMN_WIDTH + DAY_COLUMN_WIDTH),
        "─".repeat(DAY_COLUMN_WIDTH * day_count)
    )
}

/// Right-justify to exactly one day column, keeping the tail of long text.
fn cell(content: &str) -> String {
    let len = content.chars().count();
    if len > DAY_COLUMN_WIDTH {
        let tail: String = content.chars().skip(len - (DAY_COLUMN_WIDTH - 1)).collect();
        format!("…{tail}")
    } else {
        format!("{content:>width$}", width = DAY_COLUMN_WIDTH)
    }
}

fn task_label(task: &str) -> String {
    if task.chars().count() > TASK_COLUMN_WIDTH {
        let head: String = task
            .chars()
            .take(TASK_COLUMN_WIDTH - ELLIPSIS.len())
            .collect();
        format!("{head}{ELLIPSIS}")
    } else {
        task.to_string()
    }
}

fn total_label(total: Duration) -> String {
    if total.is_zero() {
        EMPTY_CELL.to_string()
    } else {
        duration::format(total)
    }
}

fn empty_label(month: &ReportMonth, day: u32) -> &'static str {
    if month.is_weekend(day) {
        WEEKEND_PLACEHOLDER
    } else {
        EMPTY_CELL
    }
}
