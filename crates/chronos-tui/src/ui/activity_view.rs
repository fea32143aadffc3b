use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::ActivityPanel;

pub fn render(f: &mut Frame, area: Rect, title: &str, panel: &ActivityPanel) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if panel.items.is_empty() {
        let empty = Paragraph::new(Span::styled(
            format!(" {}", panel.empty_message),
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let lines: Vec<Line> = panel
        .items
        .iter()
        .map(|item| Line::from(Span::styled(item.summary(), Style::default().fg(Color::White))))
        .collect();
    f.render_widget(Paragraph::new(lines).block(block), area);
}
