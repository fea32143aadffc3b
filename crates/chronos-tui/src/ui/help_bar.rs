use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render(f: &mut Frame, area: Rect) {
    let keys = Line::from(vec![
        hint("Arrows", "navigate"),
        Span::raw(" "),
        hint("Enter", "edit/save"),
        Span::raw(" "),
        hint("Q/Esc", "cancel"),
        Span::raw(" "),
        hint("Ctrl+N", "new task"),
        Span::raw(" "),
        hint("Ctrl+D", "delete"),
        Span::raw(" "),
        hint("Ctrl+R", "refresh"),
        Span::raw(" "),
        hint("Ctrl+T", "table"),
        Span::raw(" "),
        hint("Ctrl+L", "log"),
        Span::raw(" "),
        hint("Ctrl+C", "exit"),
    ]);
    let formats = Line::from(Span::styled(
        " Duration format: 1h30m, 2h, 45m, 1:15",
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(Paragraph::new(vec![keys, formats]), area);
}

fn hint(key: &str, label: &str) -> Span<'static> {
    Span::styled(
        format!("[{key}]{label}"),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
}
