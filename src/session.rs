//! # Session Store
//!
//! File-backed key/value store holding the credentials written by the login
//! flow. Plays the part browser local storage plays for the web client.

use color_eyre::eyre::{eyre, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USERNAME_KEY: &str = "username";
pub const EMAIL_KEY: &str = "email";

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    /// `None` keeps everything in memory (nothing is persisted).
    path: Option<PathBuf>,
    items: BTreeMap<String, String>,
}

impl SessionStore {
    /// `$XDG_CONFIG_HOME/arogya/session.json` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("arogya").join("session.json"))
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Loads the store at `path`. A missing or unreadable file yields an
    /// empty store bound to the same path.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = read_items(&path);
        Self {
            path: Some(path),
            items,
        }
    }

    /// Re-reads the backing file, picking up a login done elsewhere.
    pub fn reload(&mut self) {
        if let Some(path) = &self.path {
            self.items = read_items(path);
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.items.insert(key.to_string(), value.into());
        self.save()
    }

    /// Removing an absent key is not an error.
    pub fn remove_item(&mut self, key: &str) -> Result<()> {
        if self.items.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }

    /// The stored access token; an empty value counts as absent.
    pub fn access_token(&self) -> Option<&str> {
        self.get_item(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| eyre!("Failed to create session directory {parent:?}: {e}"))?;
        }

        let contents = serde_json::to_string_pretty(&self.items)
            .map_err(|e| eyre!("Failed to serialize session: {e}"))?;
        fs::write(path, contents).map_err(|e| eyre!("Failed to write session {path:?}: {e}"))?;

        tracing::debug!(?path, "saved session");
        Ok(())
    }
}

fn read_items(path: &Path) -> BTreeMap<String, String> {
    if !path.exists() {
        tracing::debug!(?path, "session file not found, starting signed out");
        return BTreeMap::new();
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(items) => {
                tracing::info!(?path, "loaded session");
                items
            }
            Err(e) => {
                tracing::warn!(?path, error = %e, "failed to parse session, starting signed out");
                BTreeMap::new()
            }
        },
        Err(e) => {
            tracing::warn!(?path, error = %e, "failed to read session, starting signed out");
            BTreeMap::new()
        }
    }
}
