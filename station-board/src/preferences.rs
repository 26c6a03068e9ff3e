//! Persistent user preferences.
//!
//! The dashboard remembers one preference, the colour theme. It is stored as
//! a small JSON object on disk, read once at startup and rewritten whenever
//! it changes.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tokio::sync::RwLock;
use tracing::warn;

/// Preference key for the colour theme.
pub const THEME_KEY: &str = "theme";

/// Colour theme of the dashboard. Dark unless the user chose light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Label of the theme toggle while this theme is active.
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "☀️",
            Theme::Dark => "🌙",
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(PreferenceError::InvalidValue {
                key: THEME_KEY,
                value: other.to_string(),
            }),
        }
    }
}

/// Errors from the preference store.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("failed to write preferences: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize preferences: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-backed string preference store.
pub struct PreferenceStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl PreferenceStore {
    /// Open the store at `path`.
    ///
    /// A missing or unreadable file yields an empty store; it is created on
    /// the first `set`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = ?path, error = %e, "ignoring unreadable preferences file");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };

        Self {
            path,
            values: RwLock::new(values),
        }
    }

    /// Get a preference.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }

    /// Set a preference and persist the store.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.write().await;
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&*values)?)?;

        Ok(())
    }

    /// The stored theme, defaulting to dark for missing or unknown values.
    pub async fn theme(&self) -> Theme {
        self.get(THEME_KEY)
            .await
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), PreferenceError> {
        self.set(THEME_KEY, theme.as_str()).await
    }

    /// Switch to the other theme and return it.
    pub async fn toggle_theme(&self) -> Result<Theme, PreferenceError> {
        let theme = self.theme().await.toggled();
        self.set_theme(theme).await?;
        Ok(theme)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
