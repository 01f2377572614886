use crate::app::{AppState, NARROW_WIDTH_THRESHOLD};
use crate::nav::MenuAnchor;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub const NAVBAR_HEIGHT: u16 = 2;
pub const APP_TITLE: &str = "Arogya AI";
const LINKS: [&str; 3] = ["Dashboard", "Report History", "About"];
const ACTIVE_LINK: &str = "Report History";
// " ? help  ( A ) "
const RIGHT_WIDTH: u16 = 16;

/// Where the user menu hangs: right edge of the bar, just below it.
pub fn avatar_anchor(area: Rect) -> MenuAnchor {
    MenuAnchor {
        right: area.x + area.width,
        bottom: area.y + NAVBAR_HEIGHT,
    }
}

pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(RIGHT_WIDTH)])
        .split(inner);

    let narrow = area.width < NARROW_WIDTH_THRESHOLD;
    f.render_widget(Paragraph::new(left_line(narrow)), cols[0]);

    let right = Line::from(vec![
        Span::styled("?", Style::default().fg(Color::Cyan)),
        Span::styled(" help  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("( {} )", state.nav.user.avatar_initial()),
            avatar_style(state.nav.is_menu_open()),
        ),
        Span::raw(" "),
    ]);
    f.render_widget(Paragraph::new(right).alignment(Alignment::Right), cols[1]);
}

fn left_line(narrow: bool) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!(" {APP_TITLE} "),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
    ];
    for link in LINKS {
        if link == ACTIVE_LINK {
            spans.push(Span::styled(
                link,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else if !narrow {
            spans.push(Span::styled(link, Style::default().fg(Color::DarkGray)));
        } else {
            continue;
        }
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

fn avatar_style(menu_open: bool) -> Style {
    let style = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    if menu_open {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn anchor_is_right_edge_below_bar() {
        let anchor = avatar_anchor(Rect::new(0, 0, 100, 30));
        assert_eq!(anchor, MenuAnchor { right: 100, bottom: 2 });
    }

    #[test]
    fn wide_bar_shows_all_links() {
        let s = text(&left_line(false));
        assert!(s.contains("Arogya AI"));
        assert!(s.contains("Dashboard"));
        assert!(s.contains("Report History"));
        assert!(s.contains("About"));
    }

    #[test]
    fn narrow_bar_keeps_only_active_link() {
        let s = text(&left_line(true));
        assert!(s.contains("Report History"));
        assert!(!s.contains("Dashboard"));
        assert!(!s.contains("About"));
    }
}
