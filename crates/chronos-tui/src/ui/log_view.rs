use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, LogLevel, Panel};
use crate::ui::layout::border_style;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = if app.log.is_following() {
        " Log ".to_string()
    } else {
        " Log (scrolled) ".to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(app.focus == Panel::Log));

    let inner_height = area.height.saturating_sub(2) as usize; // borders
    let first = app.log.first_visible(inner_height);

    let lines: Vec<Line> = app
        .log
        .entries()
        .iter()
        .skip(first)
        .take(inner_height)
        .map(|entry| {
            let color = match entry.level {
                LogLevel::Info => Color::White,
                LogLevel::Error => Color::Red,
            };
            Line::from(Span::styled(entry.render(), Style::default().fg(color)))
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
