use crate::app::AppState;
use crate::tui::navbar::APP_TITLE;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

/// Shown after logout. Sign-in itself happens in the web app.
pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let lines = vec![
        Line::from(""),
        Line::styled(
            APP_TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled("You are signed out.", Style::default().fg(Color::White)),
        Line::from(""),
        Line::styled(
            format!("Sign in at {}/login", state.config.web_url),
            Style::default().fg(Color::DarkGray),
        ),
        Line::from(vec![
            Span::styled("then press ", Style::default().fg(Color::DarkGray)),
            Span::styled("r", Style::default().fg(Color::Cyan)),
            Span::styled(" to reload your session.", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Login ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(para, area);
}
