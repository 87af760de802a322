//! Link editing: the toolbar link command and the floating link bubble.

use crate::handle::{EditorHandle, Host};
use crate::types::{CommandChain, NodeAttrs, NodeType};

/// Which actions the floating link bubble offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkBubble {
    /// Nothing to offer; the bubble stays hidden.
    Hidden,
    /// A non-empty selection outside any link.
    Add,
    /// The cursor is inside a link.
    EditOrRemove,
}

/// An action picked from the link bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    Add,
    Edit,
    Remove,
}

/// Decide what the link bubble shows for the current selection.
pub fn link_bubble(editor: &dyn EditorHandle) -> LinkBubble {
    if editor.is_active(NodeType::Link, &NodeAttrs::default()) {
        LinkBubble::EditOrRemove
    } else if editor.has_selection() {
        LinkBubble::Add
    } else {
        LinkBubble::Hidden
    }
}

/// Run a link bubble action. Returns true if the editor changed.
pub fn run_link_action(action: LinkAction, editor: &mut dyn EditorHandle, host: &mut dyn Host) -> bool {
    match action {
        LinkAction::Add | LinkAction::Edit => prompt_link(editor, host, "Enter URL:", Some("https://")),
        LinkAction::Remove => CommandChain::new().focus().unset_link().run(editor),
    }
}

/// Prompt for a URL and apply it to the link around the cursor.
///
/// The prompt is prefilled with the current href, or `fallback` when the
/// cursor is not in a link. Cancelling does nothing; an empty answer removes
/// the link; anything else sets it.
pub(crate) fn prompt_link(
    editor: &mut dyn EditorHandle,
    host: &mut dyn Host,
    message: &str,
    fallback: Option<&str>,
) -> bool {
    let previous = editor.attributes(NodeType::Link).href;
    let default = previous.as_deref().or(fallback);

    let Some(url) = host.prompt(message, default) else {
        return false;
    };

    let chain = CommandChain::new().focus().extend_mark_range(NodeType::Link);
    if url.is_empty() {
        chain.unset_link().run(editor)
    } else {
        chain.set_link(url).run(editor)
    }
}
