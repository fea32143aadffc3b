use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, Panel};
use crate::table::{render_table, DAY_COLUMN_WIDTH, FROZEN_WIDTH, HEADER_LINES};
use crate::ui::layout::border_style;

/// Render the report table inside a window that keeps the selected cell visible.
///
/// The header lines and the task/Total columns stay put; body rows scroll
/// vertically and day columns scroll horizontally.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" Time Report - {} ", app.month.title()))
        .borders(Borders::ALL)
        .border_style(border_style(app.focus == Panel::Grid));
    let inner = block.inner(area);

    let text = render_table(&app.grid, &app.month, app.cursor, &app.session);
    let all: Vec<&str> = text.lines().collect();
    let (header, body) = all.split_at(HEADER_LINES.min(all.len()));

    let body_height = (inner.height as usize).saturating_sub(header.len());
    let row_offset = (app.cursor.task + 1).saturating_sub(body_height.max(1));

    let day_width = (inner.width as usize).saturating_sub(FROZEN_WIDTH);
    let visible_days = (day_width / DAY_COLUMN_WIDTH).max(1);
    let day_offset = (app.cursor.day + 1).saturating_sub(visible_days);

    let header_style = Style::default().fg(Color::Cyan);
    let mut lines: Vec<Line> = header
        .iter()
        .map(|l| Line::from(Span::styled(window(l, day_offset), header_style)))
        .collect();
    lines.extend(
        body.iter()
            .skip(row_offset)
            .take(body_height)
            .map(|l| Line::from(window(l, day_offset))),
    );

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Frozen columns followed by the day columns starting at `day_offset`.
fn window(line: &str, day_offset: usize) -> String {
    let frozen: String = line.chars().take(FROZEN_WIDTH).collect();
    let days: String = line
        .chars()
        .skip(FROZEN_WIDTH + day_offset * DAY_COLUMN_WIDTH)
        .collect();
    frozen + &days
}
