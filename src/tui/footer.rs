use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Route, NARROW_WIDTH_THRESHOLD};
use crate::input::OverlayMode;

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let footer = Paragraph::new(footer_line(state, area.width)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}

pub fn footer_line(state: &AppState, width: u16) -> Line<'static> {
    if let Some(message) = state.history.banner_message() {
        return Line::from(vec![
            Span::styled("✓ ", Style::default().fg(Color::Green)),
            Span::styled(
                message.to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
    }

    let mut spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in hints(state, width).iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(" {desc}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn hints(state: &AppState, width: u16) -> &'static [(&'static str, &'static str)] {
    if state.route == Route::Login {
        return &[("r", "reload session"), ("q", "quit")];
    }
    match state.overlay_mode() {
        OverlayMode::Confirm => &[("y", "delete"), ("n", "cancel")],
        OverlayMode::Menu => &[("j/k", "move"), ("Enter", "select"), ("Esc", "close")],
        OverlayMode::Profile | OverlayMode::Tutorial => &[("Esc", "close")],
        OverlayMode::None if width < NARROW_WIDTH_THRESHOLD => &[
            ("j/k", "nav"),
            ("o", "view"),
            ("x", "del"),
            ("u", "upload"),
            ("m", "menu"),
            ("q", "quit"),
        ],
        OverlayMode::None => &[
            ("↑↓/jk", "navigate"),
            ("Enter/o", "view details"),
            ("x", "delete"),
            ("u", "upload new"),
            ("r", "refresh"),
            ("m", "menu"),
            ("?", "help"),
            ("q", "quit"),
        ],
    }
}
