use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::usage::DisplayMode;

/// Fixed display strings the screen asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Cookies,
    LocalStorage,
    RemoveAllCookies,
    RemoveAllLocalStorage,
    ShowAllSites,
}

impl Label {
    /// Catalog key, which doubles as the English text.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Cookies => "Cookies",
            Self::LocalStorage => "Local Storage",
            Self::RemoveAllCookies => "Remove All Cookies",
            Self::RemoveAllLocalStorage => "Remove All Local Storage",
            Self::ShowAllSites => "Show All Sites",
        }
    }

    pub const fn title(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Cookies => Self::Cookies,
            DisplayMode::LocalStorage => Self::LocalStorage,
        }
    }

    pub const fn remove_all(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Cookies => Self::RemoveAllCookies,
            DisplayMode::LocalStorage => Self::RemoveAllLocalStorage,
        }
    }
}

/// Translated strings keyed by their English text. Anything missing falls
/// back to English.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    strings: HashMap<String, String>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading string catalog {}", path.display()))?;
        let strings: HashMap<String, String> = serde_json::from_str(&text)
            .with_context(|| format!("parsing string catalog {}", path.display()))?;
        tracing::info!(path = %path.display(), entries = strings.len(), "loaded string catalog");
        Ok(Self { strings })
    }

    pub fn text(&self, label: Label) -> &str {
        self.strings
            .get(label.key())
            .map_or_else(|| label.key(), String::as_str)
    }
}
