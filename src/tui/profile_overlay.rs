use crate::nav::CurrentUser;
use crate::tui::{centered, truncate};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn render(f: &mut Frame, user: &CurrentUser) {
    let overlay_area = centered(f.area(), 44, 9);
    f.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(" User Profile ")
        .title_bottom(Line::from(" Esc close ").centered())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let value_max = overlay_area.width.saturating_sub(14) as usize;
    let label = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let session = if user.is_authenticated {
        Span::styled("signed in", Style::default().fg(Color::Green))
    } else {
        Span::styled("signed out", Style::default().fg(Color::DarkGray))
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  ( {} )", user.avatar_initial()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Username  ", label),
            Span::styled(
                truncate(user.display_name(), value_max),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("     Email  ", label),
            Span::styled(
                truncate(user.display_email(), value_max),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![Span::styled("   Session  ", label), session]),
    ];

    f.render_widget(Paragraph::new(lines).block(block), overlay_area);
}
