//! Top-level error type for lectern.

use miette::Diagnostic;

use crate::command::CommandError;
use crate::config::ConfigError;
use crate::preference::PreferenceError;
use crate::registry::RegistryError;
use crate::upload::UploadError;

/// Any error lectern reports to its host.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum LecternError {
    #[error(transparent)]
    #[diagnostic(code(lectern::config), help("check the editor config file"))]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(code(lectern::registry))]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    #[diagnostic(code(lectern::command))]
    Command(#[from] CommandError),

    #[error(transparent)]
    #[diagnostic(code(lectern::upload))]
    Upload(#[from] UploadError),

    #[error(transparent)]
    #[diagnostic(code(lectern::preference))]
    Preference(#[from] PreferenceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = LecternError::from(RegistryError::DuplicateId("bold".into()));
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("lectern::registry"));
        assert_eq!(err.to_string(), "duplicate command id `bold`");

        let err = LecternError::from(ConfigError::InvalidHeadingLevel(9));
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("lectern::config"));
        assert!(err.help().is_some());
    }
}
