use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    DismissError,
    MoveUp,
    MoveDown,
    Refresh,
    RequestDelete,
    ConfirmYes,
    ConfirmNo,
    OpenDetails,
    UploadNew,
    OpenUserMenu,
    MenuUp,
    MenuDown,
    MenuSelect,
    OpenProfile,
    Logout,
    OpenTutorial,
    CloseOverlay,
    ReloadSession,
    None,
}

/// Which overlay (if any) is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayMode {
    #[default]
    None,
    Menu,
    Profile,
    Confirm,
    Tutorial,
}

/// Captures the UI state needed to interpret a key press.
#[derive(Debug, Clone, Default)]
pub struct InputContext {
    pub has_error: bool,
    pub is_loading: bool,
    pub signed_out: bool,
    pub overlay: OverlayMode,
}

pub fn map_key(key: KeyEvent, ctx: &InputContext) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    if ctx.signed_out {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('r') | KeyCode::Enter => Action::ReloadSession,
            _ => Action::None,
        };
    }

    match ctx.overlay {
        OverlayMode::Confirm => {
            return match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Action::ConfirmYes,
                KeyCode::Char('n' | 'N' | 'q') | KeyCode::Esc => Action::ConfirmNo,
                _ => Action::None,
            };
        }
        OverlayMode::Menu => {
            return match key.code {
                KeyCode::Char('j') | KeyCode::Down => Action::MenuDown,
                KeyCode::Char('k') | KeyCode::Up => Action::MenuUp,
                KeyCode::Enter => Action::MenuSelect,
                KeyCode::Char('p') => Action::OpenProfile,
                KeyCode::Char('l') => Action::Logout,
                KeyCode::Char('q' | 'm') | KeyCode::Esc => Action::CloseOverlay,
                _ => Action::None,
            };
        }
        OverlayMode::Profile => {
            return match key.code {
                KeyCode::Char('q' | 'p') | KeyCode::Esc | KeyCode::Enter => Action::CloseOverlay,
                _ => Action::None,
            };
        }
        OverlayMode::Tutorial => {
            return match key.code {
                KeyCode::Char('q' | '?') | KeyCode::Esc => Action::CloseOverlay,
                _ => Action::None,
            };
        }
        OverlayMode::None => {}
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => {
            if ctx.has_error {
                Action::DismissError
            } else {
                Action::Quit
            }
        }
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Char('r') if !ctx.is_loading => Action::Refresh,
        KeyCode::Char('x' | 'd') | KeyCode::Delete => Action::RequestDelete,
        KeyCode::Enter | KeyCode::Char('o') => Action::OpenDetails,
        KeyCode::Char('u') => Action::UploadNew,
        KeyCode::Char('m') => Action::OpenUserMenu,
        KeyCode::Char('?') => Action::OpenTutorial,
        _ => Action::None,
    }
}
