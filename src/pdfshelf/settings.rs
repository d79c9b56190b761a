use crate::error::Result;
use crate::store::{StorageBackend, PRIMARY_KEY, THEME_KEY};
use log::debug;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PRIMARY: &str = "#ef4444";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {other}")),
        }
    }
}

/// Persisted look-and-feel preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub theme: Theme,
    pub primary: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            primary: DEFAULT_PRIMARY.to_string(),
        }
    }
}

impl Settings {
    /// Read settings, falling back to defaults for anything missing or unreadable.
    pub fn load<B: StorageBackend + ?Sized>(backend: &B) -> Self {
        let defaults = Self::default();

        let theme = match backend.get_item(THEME_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|e| {
                debug!("{e}, using default theme");
                defaults.theme
            }),
            _ => defaults.theme,
        };

        let primary = match backend.get_item(PRIMARY_KEY) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw.trim().to_string(),
            _ => defaults.primary,
        };

        Self { theme, primary }
    }

    pub fn save<B: StorageBackend + ?Sized>(&self, backend: &B) -> Result<()> {
        backend.set_item(THEME_KEY, &self.theme.to_string())?;
        backend.set_item(PRIMARY_KEY, &self.primary)?;
        Ok(())
    }
}
