//! Abstraction traits for the editor engine and the host UI.
//!
//! These traits define the interface between the toolbar/interception logic
//! and whatever actually edits the document (a browser rich-text engine, a
//! native widget, the headless editor used in tests) and whatever shows
//! dialogs to the user.

use crate::types::{EditorOp, NodeAttrs, NodeType};

/// Handle to a live rich-text engine instance.
///
/// The engine owns the document, history and schema. This crate only queries
/// it and issues command chains through it.
pub trait EditorHandle {
    /// Whether the node or mark is active at the current selection.
    ///
    /// `attrs` narrows the query, e.g. `NodeAttrs::level(2)` for "heading
    /// level 2". Unset attributes match anything.
    fn is_active(&self, node: NodeType, attrs: &NodeAttrs) -> bool;

    /// Whether the op could execute against the current state.
    fn can(&self, op: &EditorOp) -> bool;

    /// Apply a chain of ops atomically.
    ///
    /// Either every op is applied as one transaction or none is. Returns true
    /// if the chain was applied.
    fn apply(&mut self, ops: &[EditorOp]) -> bool;

    /// Attributes of the node or mark at the current selection.
    fn attributes(&self, node: NodeType) -> NodeAttrs;

    /// Whether the engine accepts edits.
    fn is_editable(&self) -> bool;

    /// Switch the engine between editable and read-only. A read-only engine
    /// rejects every chain that changes the document.
    fn set_editable(&mut self, editable: bool);

    /// Whether the document has no content.
    fn is_empty(&self) -> bool;

    /// Whether the selection spans at least one character.
    fn has_selection(&self) -> bool;

    /// Serialize the document to markup.
    fn html(&self) -> String;

    /// Serialize the document to the engine's structured tree.
    fn json(&self) -> serde_json::Value;
}

/// Host UI operations the toolbar needs beyond the editor itself.
///
/// Browser hosts map these to `prompt()`, `alert()` and a hidden file input.
pub trait Host {
    /// Ask the user for a line of text. `None` means the prompt was cancelled.
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String>;

    /// Show a blocking notification.
    fn alert(&mut self, message: &str);

    /// Open a file-selection surface filtered by `accept` (comma separated
    /// media types). The selection comes back through the toolbar's picker flow.
    fn open_file_picker(&mut self, accept: &str);
}
