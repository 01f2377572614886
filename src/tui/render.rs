use crate::app::{AppState, Route};
use crate::input::OverlayMode;
use crate::tui::navbar::NAVBAR_HEIGHT;
use crate::tui::{
    confirm_overlay, footer, help_overlay, login, menu_overlay, navbar, profile_overlay, timeline,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn render(f: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(NAVBAR_HEIGHT), // nav bar
            Constraint::Min(1),                // body
            Constraint::Length(2),             // footer
        ])
        .split(f.area());

    navbar::render(f, chunks[0], state);
    match state.route {
        Route::History => timeline::render(f, chunks[1], state),
        Route::Login => login::render(f, chunks[1], state),
    }
    footer::render(f, chunks[2], state);

    // Error toast, above the footer
    if let Some(err) = state.error_message() {
        let area = f.area();
        if area.height > 6 && area.width >= 4 {
            let err_area = Rect {
                x: area.x + 1,
                y: area.y + area.height.saturating_sub(5),
                width: area.width.saturating_sub(2),
                height: 3,
            };
            let err_widget = Paragraph::new(err)
                .style(Style::default().fg(Color::Red))
                .block(
                    Block::default()
                        .title(" Error ")
                        .title_bottom(" Esc dismiss ")
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .wrap(Wrap { trim: true });
            f.render_widget(Clear, err_area);
            f.render_widget(err_widget, err_area);
        }
    }

    // Overlays are drawn last so they sit on top
    match state.overlay_mode() {
        OverlayMode::Confirm => confirm_overlay::render(f),
        OverlayMode::Profile => profile_overlay::render(f, &state.nav.user),
        OverlayMode::Menu => {
            if let Some(menu) = &state.nav.menu {
                menu_overlay::render(f, menu);
            }
        }
        OverlayMode::Tutorial => help_overlay::render(f, &state.config.version_string),
        OverlayMode::None => {}
    }
}
