//! Editor configuration, loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::defaults::{DEFAULT_HEADING_LEVELS, PLACEHOLDER_TEXT};
use crate::upload::UploadPolicy;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("error reading config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error parsing config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("heading level {0} is outside 1..=6")]
    InvalidHeadingLevel(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Quiet interval before a change notification fires.
    pub debounce_ms: u64,
    pub editable: bool,
    pub placeholder: String,
    /// Undo steps kept by the engine.
    pub history_depth: usize,
    pub heading_levels: Vec<u8>,
    /// Preference key the theme is stored under.
    pub theme_key: String,
    pub upload: UploadPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            editable: true,
            placeholder: PLACEHOLDER_TEXT.to_string(),
            history_depth: 20,
            heading_levels: DEFAULT_HEADING_LEVELS.to_vec(),
            theme_key: "theme".to_string(),
            upload: UploadPolicy::default(),
        }
    }
}

impl EditorConfig {
    /// Read a config file, substituting `$VAR` references from the
    /// environment before parsing.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = substitute_vars(&text, std::env::vars());
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded editor config");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.heading_levels.iter().find(|l| !(1..=6).contains(*l)) {
            Some(&level) => Err(ConfigError::InvalidHeadingLevel(level)),
            None => Ok(()),
        }
    }

    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Replace `$NAME` with the value of each variable. Longer names go first so
/// `$HOME_DIR` is not clobbered by `$HOME`.
fn substitute_vars(text: &str, vars: impl IntoIterator<Item = (String, String)>) -> String {
    let mut vars: Vec<_> = vars.into_iter().collect();
    vars.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = text.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("${key}"), &value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::from_toml_str("").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.debounce_interval(), Duration::from_millis(300));
        assert_eq!(config.placeholder, "Start typing...");
        assert_eq!(config.upload.max_file_size_mb, 5);
    }

    #[test]
    fn test_partial_override() {
        let config = EditorConfig::from_toml_str(
            r#"
            debounce_ms = 50
            heading_levels = [1, 2, 3, 4]

            [upload]
            max_file_size_mb = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.debounce_ms, 50);
        assert_eq!(config.heading_levels, [1, 2, 3, 4]);
        assert_eq!(config.upload.max_file_size_mb, 2);
        assert_eq!(config.upload.accepted_types.len(), 4);
        assert!(config.editable);
    }

    #[test]
    fn test_invalid_heading_level() {
        let err = EditorConfig::from_toml_str("heading_levels = [1, 7]").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHeadingLevel(7)));
    }

    #[test]
    fn test_parse_error() {
        let err = EditorConfig::from_toml_str("debounce_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_substitute_vars() {
        let vars = [
            ("PREFIX".to_string(), "short".to_string()),
            ("PREFIX_LONG".to_string(), "long".to_string()),
        ];
        assert_eq!(
            substitute_vars("a = \"$PREFIX_LONG\"\nb = \"$PREFIX\"", vars),
            "a = \"long\"\nb = \"short\""
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lectern.toml");
        std::fs::write(&path, "editable = false\ntheme_key = \"lectern-theme\"\n").unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert!(!config.editable);
        assert_eq!(config.theme_key, "lectern-theme");

        let missing = EditorConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));
    }
}
