use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::ui::layout::centered_fixed;

const POPUP_WIDTH: u16 = 50;
const POPUP_HEIGHT: u16 = 5;

pub fn render(f: &mut Frame, buffer: &str) {
    let area = centered_fixed(POPUP_WIDTH, POPUP_HEIGHT, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Add New Task ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let text = vec![
        Line::from(vec![
            Span::styled("Task name: ", Style::default().fg(Color::Cyan)),
            Span::styled(buffer.to_string(), Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to confirm, Esc to cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(text).block(block), area);
}
