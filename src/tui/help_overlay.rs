use crate::tui::centered;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const KEYS: &[(&str, &str)] = &[
    ("↑↓ / j k", "Move between reports"),
    ("Enter / o", "View details in the browser"),
    ("x / d / Del", "Delete the selected report"),
    ("u", "Upload a new report"),
    ("r", "Refresh the list"),
    ("m", "Open the user menu"),
    ("Esc", "Dismiss an error"),
    ("?", "Show this guide"),
    ("q", "Quit"),
];

/// Keybinding guide opened from the nav bar's help control.
pub fn render(f: &mut Frame, version: &str) {
    let height = KEYS.len() as u16 + 4;
    let overlay_area = centered(f.area(), 52, height);
    f.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(" Getting Started ")
        .title_bottom(Line::from(format!(" {version} ")).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let key_width = KEYS.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let mut lines = vec![Line::from("")];
    lines.extend(KEYS.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(
                format!("  {key:>key_width$}  "),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(*desc, Style::default().fg(Color::White)),
        ])
    }));

    f.render_widget(Paragraph::new(lines).block(block), overlay_area);
}
