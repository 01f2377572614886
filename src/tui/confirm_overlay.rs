use crate::tui::centered;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub const TITLE: &str = "Confirm Deletion";
pub const MESSAGE: &str =
    "Are you sure you want to permanently delete this report? This action cannot be undone.";

pub fn render(f: &mut Frame) {
    let overlay_area = centered(f.area(), 50, 8);
    f.render_widget(Clear, overlay_area);

    let hints = Line::from(vec![
        Span::styled(
            "y",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" delete   ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            "n",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" cancel ", Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default()
        .title(format!(" {TITLE} "))
        .title_bottom(hints.centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::styled(MESSAGE, Style::default().fg(Color::White)),
    ])
    .block(block)
    .wrap(Wrap { trim: true })
    .centered();
    f.render_widget(paragraph, overlay_area);
}
