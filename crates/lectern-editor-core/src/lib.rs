//! lectern-editor-core: editor shell logic without framework dependencies.
//!
//! The rich-text engine itself lives outside this crate. This crate provides:
//! - `EditorHandle` / `Host` traits describing the engine and the host UI
//! - `EditorOp` and `CommandChain` for atomic command chains
//! - `Command` / `CommandRegistry`, the declarative toolbar table
//! - `Toolbar`, which reconciles the registry against live editor state
//! - Drop and paste interception decisions
//! - Upload policy, theme state, preference storage and the output shell

pub mod command;
pub mod config;
pub mod defaults;
pub mod error;
pub mod handle;
pub mod intercept;
pub mod link;
pub mod markdown;
pub mod output;
pub mod preference;
pub mod registry;
pub mod theme;
pub mod toolbar;
pub mod types;
pub mod upload;

#[cfg(any(test, feature = "headless"))]
pub mod headless;

pub use command::{Category, Command, CommandError, DisplayHint, Invocation};
pub use config::{ConfigError, EditorConfig};
pub use defaults::{DEFAULT_EDITOR_CONTENT, PLACEHOLDER_TEXT, clear_formatting_command, default_registry};
pub use error::LecternError;
pub use handle::{EditorHandle, Host};
pub use intercept::{
    DropEvent, DropPlan, InterceptionDecision, evaluate_drop, intercept_paste, looks_like_markdown,
};
pub use link::{LinkAction, LinkBubble, link_bubble, run_link_action};
pub use markdown::{CmarkConverter, MarkdownConverter};
pub use output::{ContentSnapshot, OutputShell, OutputView};
pub use preference::{FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceStore};
pub use registry::{CommandGroup, CommandRegistry, GroupKind, RegistryError};
pub use smol_str::SmolStr;
pub use theme::{FixedAppearance, SystemAppearance, Theme, ThemeState};
pub use toolbar::{Availability, ButtonView, ClickOutcome, GroupView, Phase, PickerState, Toolbar, ToolbarView};
pub use types::{CommandChain, EditorOp, NodeAttrs, NodeType};
pub use upload::{FileData, UploadError, UploadPolicy};
