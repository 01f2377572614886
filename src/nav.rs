//! Navigation bar state: user menu, profile dialog and client-side logout.

use crate::api::ApiClient;
use crate::session::{SessionStore, ACCESS_TOKEN_KEY, EMAIL_KEY, REFRESH_TOKEN_KEY, USERNAME_KEY};

pub const GUEST_USERNAME: &str = "Guest User";
pub const NO_EMAIL: &str = "No Email Provided";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub is_authenticated: bool,
}

impl CurrentUser {
    pub fn from_session(store: &SessionStore) -> Self {
        let non_empty = |key: &str| {
            store
                .get_item(key)
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        };
        Self {
            username: non_empty(USERNAME_KEY),
            email: non_empty(EMAIL_KEY),
            is_authenticated: store.access_token().is_some(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(GUEST_USERNAME)
    }

    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or(NO_EMAIL)
    }

    pub fn avatar_initial(&self) -> String {
        self.username
            .as_deref()
            .and_then(|name| name.chars().next())
            .map_or_else(|| "U".to_string(), |c| c.to_uppercase().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Profile,
    Logout,
}

pub const MENU_ITEMS: [MenuItem; 2] = [MenuItem::Profile, MenuItem::Logout];

impl MenuItem {
    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Profile => "Profile",
            MenuItem::Logout => "Logout",
        }
    }
}

/// Screen position of the control that opened the menu. The menu hangs
/// below `bottom` with its right edge at `right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuAnchor {
    pub right: u16,
    pub bottom: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserMenu {
    pub anchor: MenuAnchor,
    pub selected: usize,
}

#[derive(Debug, Clone, Default)]
pub struct NavState {
    pub user: CurrentUser,
    pub menu: Option<UserMenu>,
    pub profile_open: bool,
}

impl NavState {
    /// Reads the current user once, as the bar is mounted.
    pub fn mount(store: &SessionStore) -> Self {
        Self {
            user: CurrentUser::from_session(store),
            menu: None,
            profile_open: false,
        }
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_some()
    }

    pub fn open_user_menu(&mut self, anchor: MenuAnchor) {
        self.menu = Some(UserMenu {
            anchor,
            selected: 0,
        });
    }

    pub fn close_user_menu(&mut self) {
        self.menu = None;
    }

    pub fn menu_up(&mut self) {
        if let Some(menu) = &mut self.menu {
            menu.selected = menu.selected.saturating_sub(1);
        }
    }

    pub fn menu_down(&mut self) {
        if let Some(menu) = &mut self.menu {
            if menu.selected + 1 < MENU_ITEMS.len() {
                menu.selected += 1;
            }
        }
    }

    pub fn selected_menu_item(&self) -> Option<MenuItem> {
        self.menu.and_then(|m| MENU_ITEMS.get(m.selected).copied())
    }

    pub fn open_profile_dialog(&mut self) {
        self.close_user_menu();
        self.profile_open = true;
    }

    pub fn close_profile_dialog(&mut self) {
        self.profile_open = false;
    }

    /// Tears the session down locally: both tokens and the shared default
    /// header go, whatever state they were in. Never contacts the server.
    pub fn logout(&mut self, store: &mut SessionStore, client: &ApiClient) {
        self.close_user_menu();
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
            if let Err(e) = store.remove_item(key) {
                tracing::warn!(key, error = %e, "failed to persist credential removal");
            }
        }
        client.clear_default_authorization();
        self.user.is_authenticated = false;
        tracing::info!("logged out");
    }
}
