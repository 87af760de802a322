//! Toolbar reconciliation.
//!
//! The toolbar holds no per-button state. Every `render` walks the registry
//! and evaluates each command's predicates against the live editor, so the
//! view is always a function of the registry, the lifecycle phase, the
//! editable flag and the editor handle.

use std::sync::Arc;

use serde::Serialize;
use smol_str::SmolStr;

use crate::command::{CommandError, DisplayHint};
use crate::defaults::labels;
use crate::handle::{EditorHandle, Host};
use crate::registry::{CommandRegistry, GroupKind};
use crate::upload::UploadPolicy;

/// Editor lifecycle as seen by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// The engine has not mounted yet.
    #[default]
    Unready,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerState {
    #[default]
    Closed,
    /// The file picker is showing; an image may arrive.
    Open,
}

/// Why the toolbar is or isn't usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    /// No engine yet. Only a placeholder is shown.
    Unready,
    /// The engine is up but not editable.
    ReadOnly,
    Ready,
}

/// One rendered button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub id: SmolStr,
    pub display: DisplayHint,
    pub tooltip: SmolStr,
    pub active: bool,
    pub disabled: bool,
    pub opens_picker: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
    pub kind: GroupKind,
    pub buttons: Vec<ButtonView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolbarView {
    pub availability: Availability,
    pub groups: Vec<GroupView>,
}

impl ToolbarView {
    /// Placeholder text to show instead of the buttons, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self.availability {
            Availability::Unready => Some(labels::LOADING),
            Availability::ReadOnly | Availability::Ready => None,
        }
    }

    pub fn buttons(&self) -> impl Iterator<Item = &ButtonView> + '_ {
        self.groups.iter().flat_map(|g| g.buttons.iter())
    }

    /// First button with the given id.
    pub fn button(&self, id: &str) -> Option<&ButtonView> {
        self.buttons().find(|b| b.id.as_str() == id)
    }
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Unknown, disabled or unavailable; nothing happened.
    Ignored,
    Invoked,
    PickerOpened,
}

/// Reconciles a command registry against editor state.
#[derive(Debug, Clone)]
pub struct Toolbar {
    registry: Arc<CommandRegistry>,
    phase: Phase,
    editable: bool,
    picker: PickerState,
    accept: String,
}

impl Toolbar {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self {
            registry,
            phase: Phase::Unready,
            editable: true,
            picker: PickerState::Closed,
            accept: UploadPolicy::default().accept_attribute(),
        }
    }

    /// Use the accepted types of `policy` for the file picker.
    pub fn with_upload_policy(mut self, policy: &UploadPolicy) -> Self {
        self.accept = policy.accept_attribute();
        self
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Move to `Ready`. Returns false if the toolbar was already ready.
    pub fn mark_ready(&mut self) -> bool {
        if self.phase == Phase::Ready {
            return false;
        }
        tracing::debug!("toolbar ready");
        self.phase = Phase::Ready;
        true
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn picker(&self) -> PickerState {
        self.picker
    }

    /// Value for the picker's `accept` attribute.
    pub fn accept(&self) -> &str {
        &self.accept
    }

    fn availability(&self, editor: Option<&dyn EditorHandle>) -> Availability {
        match (self.phase, editor) {
            (Phase::Unready, _) | (_, None) => Availability::Unready,
            (Phase::Ready, Some(editor)) if !self.editable || !editor.is_editable() => {
                Availability::ReadOnly
            }
            (Phase::Ready, Some(_)) => Availability::Ready,
        }
    }

    /// Compute the current view.
    pub fn render(&self, editor: Option<&dyn EditorHandle>) -> ToolbarView {
        let availability = self.availability(editor);
        let live = editor.filter(|_| availability != Availability::Unready);

        let groups = self
            .registry
            .groups()
            .iter()
            .map(|group| GroupView {
                kind: group.kind(),
                buttons: group
                    .commands()
                    .iter()
                    .map(|command| {
                        let (active, disabled) = match live {
                            Some(editor) => (
                                command.is_active(editor),
                                availability == Availability::ReadOnly || command.is_disabled(editor),
                            ),
                            None => (false, true),
                        };
                        ButtonView {
                            id: command.id().clone(),
                            display: command.display().clone(),
                            tooltip: command.tooltip().clone(),
                            active,
                            disabled,
                            opens_picker: command.opens_picker(),
                        }
                    })
                    .collect(),
            })
            .collect();

        ToolbarView { availability, groups }
    }

    /// Handle a button click.
    ///
    /// Errors from the command are returned unchanged.
    pub fn click(
        &mut self,
        id: &str,
        editor: Option<&mut dyn EditorHandle>,
        host: &mut dyn Host,
    ) -> Result<ClickOutcome, CommandError> {
        let Some(editor) = editor else {
            tracing::debug!(id, "click before editor is available");
            return Ok(ClickOutcome::Ignored);
        };
        if self.availability(Some(&*editor)) != Availability::Ready {
            tracing::debug!(id, "click while toolbar unavailable");
            return Ok(ClickOutcome::Ignored);
        }
        let Some(command) = self.registry.get(id).cloned() else {
            tracing::debug!(id, "click on unknown command");
            return Ok(ClickOutcome::Ignored);
        };
        if command.is_disabled(&*editor) {
            return Ok(ClickOutcome::Ignored);
        }

        if command.opens_picker() {
            self.picker = PickerState::Open;
            host.open_file_picker(&self.accept);
            return Ok(ClickOutcome::PickerOpened);
        }

        command.invoke(editor, host)?;
        Ok(ClickOutcome::Invoked)
    }

    /// The picker was closed without choosing a file.
    pub fn picker_dismissed(&mut self) {
        self.reset_picker();
    }

    /// Return the picker to `Closed` after a pick has been handled.
    pub fn reset_picker(&mut self) {
        self.picker = PickerState::Closed;
    }
}
