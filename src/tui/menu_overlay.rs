use crate::nav::{UserMenu, MENU_ITEMS};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const MENU_WIDTH: u16 = 16;

/// The menu box: right-aligned to the anchor and hanging just below it,
/// clipped to `area`.
pub fn menu_area(menu: &UserMenu, area: Rect) -> Rect {
    let height = (MENU_ITEMS.len() as u16 + 2).min(area.height);
    let width = MENU_WIDTH.min(area.width);
    let right = menu.anchor.right.min(area.x + area.width);
    let x = right.saturating_sub(width).max(area.x);
    let y = menu
        .anchor
        .bottom
        .min((area.y + area.height).saturating_sub(height));
    Rect::new(x, y, width, height)
}

pub fn render(f: &mut Frame, menu: &UserMenu) {
    let overlay_area = menu_area(menu, f.area());
    f.render_widget(Clear, overlay_area);

    let lines: Vec<Line> = MENU_ITEMS
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == menu.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let width = MENU_WIDTH as usize - 3;
            Line::from(Span::styled(format!(" {:<width$}", item.label()), style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));
    f.render_widget(Paragraph::new(lines).block(block), overlay_area);
}
