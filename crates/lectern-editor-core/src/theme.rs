//! Light/dark theme state.
//!
//! The initial theme comes from the persisted preference if there is one, then
//! the system appearance, then light. Every change is written back.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::preference::{PreferenceError, PreferenceStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme `{other}`")),
        }
    }
}

/// The platform's colour-scheme preference.
pub trait SystemAppearance {
    fn prefers_dark(&self) -> bool;
}

/// A system appearance fixed at construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAppearance(pub bool);

impl SystemAppearance for FixedAppearance {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

/// Current theme plus the store it persists to.
#[derive(Debug)]
pub struct ThemeState<S> {
    theme: Theme,
    store: S,
    key: String,
}

impl<S: PreferenceStore> ThemeState<S> {
    /// Resolve the initial theme.
    ///
    /// Unreadable or unrecognised stored values fall through to the system
    /// appearance.
    pub fn load(store: S, key: impl Into<String>, appearance: &dyn SystemAppearance) -> Self {
        let key = key.into();
        let stored = match store.get(&key) {
            Ok(Some(value)) => match value.parse::<Theme>() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    tracing::warn!(%key, "ignoring stored theme: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(%key, "failed to read theme preference: {e}");
                None
            }
        };

        let theme = stored.unwrap_or(if appearance.prefers_dark() {
            Theme::Dark
        } else {
            Theme::Light
        });
        Self { theme, store, key }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Flip the theme and persist it.
    ///
    /// The in-memory theme changes even if persisting fails.
    pub fn toggle(&mut self) -> Result<Theme, PreferenceError> {
        self.set(self.theme.toggled())
    }

    pub fn set(&mut self, theme: Theme) -> Result<Theme, PreferenceError> {
        self.theme = theme;
        self.store.set(&self.key, theme.as_str())?;
        Ok(theme)
    }
}
