//! Toolbar commands.
//!
//! A `Command` bundles everything the toolbar needs for one button: identity,
//! the procedure to run on click and the predicates that decide how the button
//! is drawn. Parameters such as a heading level are captured by the closures
//! when the command is built, so there is exactly one shape of invocation.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use smol_str::SmolStr;
use thiserror::Error;

use crate::handle::{EditorHandle, Host};

/// Procedure run when a command is invoked.
pub type InvokeFn =
    Arc<dyn Fn(&mut dyn EditorHandle, &mut dyn Host) -> Result<(), CommandError> + Send + Sync>;

/// Predicate over the current editor state.
pub type PredicateFn = Arc<dyn Fn(&dyn EditorHandle) -> bool + Send + Sync>;

/// Errors raised while invoking a command.
///
/// The registry and toolbar never catch these; they go straight back to
/// whoever dispatched the click.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommandError {
    /// The engine reported an error of its own.
    #[error("editor error: {0}")]
    Engine(String),
}

/// What kind of editing action a command performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    BlockFormat,
    InlineFormat,
    ListFormat,
    Insertion,
    HistoryAction,
    LinkAction,
}

/// How a button is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DisplayHint {
    /// Icon identifier understood by the host's icon set.
    Icon(SmolStr),
    /// Plain text label.
    Label(SmolStr),
}

/// What happens when a command's button is clicked.
#[derive(Clone)]
pub enum Invocation {
    /// Run a procedure against the editor.
    Edit(InvokeFn),
    /// Open the image picker. The picked file is uploaded asynchronously and
    /// inserted once the upload resolves.
    PickImage,
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edit(_) => f.write_str("Edit(..)"),
            Self::PickImage => f.write_str("PickImage"),
        }
    }
}

/// One user-invokable editing action.
#[derive(Clone)]
pub struct Command {
    id: SmolStr,
    category: Category,
    invocation: Invocation,
    is_active: Option<PredicateFn>,
    is_disabled: Option<PredicateFn>,
    display: DisplayHint,
    tooltip: SmolStr,
}

impl Command {
    /// Create a command that runs `invoke` against the editor.
    pub fn edit<F>(id: impl Into<SmolStr>, category: Category, tooltip: impl Into<SmolStr>, invoke: F) -> Self
    where
        F: Fn(&mut dyn EditorHandle, &mut dyn Host) -> Result<(), CommandError> + Send + Sync + 'static,
    {
        let tooltip = tooltip.into();
        Self {
            id: id.into(),
            category,
            invocation: Invocation::Edit(Arc::new(invoke)),
            is_active: None,
            is_disabled: None,
            display: DisplayHint::Label(tooltip.clone()),
            tooltip,
        }
    }

    /// Create a command that opens the image picker.
    pub fn pick_image(id: impl Into<SmolStr>, tooltip: impl Into<SmolStr>) -> Self {
        let tooltip = tooltip.into();
        Self {
            id: id.into(),
            category: Category::Insertion,
            invocation: Invocation::PickImage,
            is_active: None,
            is_disabled: None,
            display: DisplayHint::Label(tooltip.clone()),
            tooltip,
        }
    }

    /// Set the active-state predicate.
    pub fn active<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&dyn EditorHandle) -> bool + Send + Sync + 'static,
    {
        self.is_active = Some(Arc::new(predicate));
        self
    }

    /// Set the disabled-state predicate.
    pub fn disabled<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&dyn EditorHandle) -> bool + Send + Sync + 'static,
    {
        self.is_disabled = Some(Arc::new(predicate));
        self
    }

    pub fn icon(mut self, icon: impl Into<SmolStr>) -> Self {
        self.display = DisplayHint::Icon(icon.into());
        self
    }

    pub fn label(mut self, label: impl Into<SmolStr>) -> Self {
        self.display = DisplayHint::Label(label.into());
        self
    }

    pub fn id(&self) -> &SmolStr {
        &self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    pub fn display(&self) -> &DisplayHint {
        &self.display
    }

    pub fn tooltip(&self) -> &SmolStr {
        &self.tooltip
    }

    /// Whether the command opens the image picker instead of editing directly.
    pub fn opens_picker(&self) -> bool {
        matches!(self.invocation, Invocation::PickImage)
    }

    /// Evaluate the active predicate. Commands without one are never active.
    pub fn is_active(&self, editor: &dyn EditorHandle) -> bool {
        self.is_active.as_ref().is_some_and(|p| p(editor))
    }

    /// Evaluate the disabled predicate. Commands without one are never disabled.
    pub fn is_disabled(&self, editor: &dyn EditorHandle) -> bool {
        self.is_disabled.as_ref().is_some_and(|p| p(editor))
    }

    /// Run the command's procedure.
    ///
    /// `PickImage` commands have no procedure; the toolbar handles them.
    pub fn invoke(&self, editor: &mut dyn EditorHandle, host: &mut dyn Host) -> Result<(), CommandError> {
        match &self.invocation {
            Invocation::Edit(invoke) => {
                tracing::debug!(id = %self.id, "invoking command");
                invoke(editor, host)
            }
            Invocation::PickImage => Ok(()),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("invocation", &self.invocation)
            .field("display", &self.display)
            .field("tooltip", &self.tooltip)
            .finish_non_exhaustive()
    }
}
