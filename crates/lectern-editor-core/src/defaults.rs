//! The stock toolbar: labels, default commands and demo content.

use crate::command::{Category, Command};
use crate::link::prompt_link;
use crate::registry::{CommandRegistry, GroupKind, RegistryError};
use crate::types::{CommandChain, EditorOp, NodeAttrs, NodeType};

/// Button tooltips and other user-facing strings.
pub mod labels {
    pub const PARAGRAPH: &str = "Paragraph";
    pub const BOLD: &str = "Bold";
    pub const ITALIC: &str = "Italic";
    pub const UNDERLINE: &str = "Underline";
    pub const BULLET_LIST: &str = "Bullet List";
    pub const ORDERED_LIST: &str = "Numbered List";
    pub const CODE_BLOCK: &str = "Code Block";
    pub const BLOCKQUOTE: &str = "Blockquote";
    pub const HORIZONTAL_RULE: &str = "Horizontal Rule";
    pub const IMAGE_UPLOAD: &str = "Upload Image";
    pub const ADD_LINK: &str = "Add Link";
    pub const UNDO: &str = "Undo";
    pub const REDO: &str = "Redo";
    pub const CLEAR_FORMATTING: &str = "Clear Formatting";
    pub const TOGGLE_DARK_MODE: &str = "Toggle Dark Mode";
    pub const VIEW_HTML: &str = "View HTML";
    pub const VIEW_JSON: &str = "View JSON";
    pub const LOADING: &str = "Editor loading or disabled...";
}

pub const PLACEHOLDER_TEXT: &str = "Start typing...";

/// Heading levels offered by the stock toolbar.
pub const DEFAULT_HEADING_LEVELS: [u8; 3] = [1, 2, 3];

pub const DEFAULT_EDITOR_CONTENT: &str = concat!(
    "<h1>Lectern Editor Demo</h1>",
    "<p>Try out the formatting options in the toolbar above.</p>",
    "<ul><li><p>Bullet list item</p></li></ul>",
    "<ol><li><p>Numbered list item</p></li></ol>",
    "<blockquote><p>This is a blockquote. It's great for highlighting text.</p></blockquote>",
    "<pre><code class=\"language-rust\">println!(\"Hello, world!\");</code></pre>",
    "<p>You can also insert horizontal rules:</p><hr>",
    "<p>And add <strong>bold</strong>, <em>italic</em>, or <u>underlined</u> text, ",
    "as well as <a href=\"https://www.rust-lang.org\">links</a>.</p>",
);

fn chain_command(
    id: &str,
    category: Category,
    tooltip: &str,
    icon: &str,
    ops: impl IntoIterator<Item = EditorOp>,
) -> Command {
    let ops: Vec<EditorOp> = ops.into_iter().collect();
    Command::edit(id, category, tooltip, move |editor, _| {
        ops.iter()
            .fold(CommandChain::new().focus(), |chain, op| chain.op(op.clone()))
            .run(editor);
        Ok(())
    })
    .icon(icon)
}

fn active_when(command: Command, node: NodeType) -> Command {
    command.active(move |editor| editor.is_active(node, &NodeAttrs::default()))
}

/// One command per heading level, each closing over its level.
pub fn heading_command(level: u8) -> Command {
    Command::edit(
        format!("h{level}"),
        Category::BlockFormat,
        format!("Heading {level}"),
        move |editor, _| {
            CommandChain::new().focus().toggle_heading(level).run(editor);
            Ok(())
        },
    )
    .active(move |editor| editor.is_active(NodeType::Heading, &NodeAttrs::level(level)))
    .icon(format!("heading-{level}"))
}

fn link_command() -> Command {
    Command::edit("link", Category::LinkAction, labels::ADD_LINK, |editor, host| {
        prompt_link(editor, host, "URL", None);
        Ok(())
    })
    .active(|editor| editor.is_active(NodeType::Link, &NodeAttrs::default()))
    .icon("link-2")
}

fn image_command() -> Command {
    Command::pick_image("imageUpload", labels::IMAGE_UPLOAD)
        .disabled(|editor| !editor.is_editable())
        .icon("image")
}

fn history_command(id: &str, tooltip: &str, op: EditorOp) -> Command {
    let guard = op.clone();
    Command::edit(id, Category::HistoryAction, tooltip, move |editor, _| {
        CommandChain::new().focus().op(op.clone()).run(editor);
        Ok(())
    })
    .disabled(move |editor| !editor.can(&guard))
    .icon(id)
}

/// Clears marks and resets blocks to paragraphs.
///
/// Not part of the stock groups; hosts that want it add it to their own
/// registry.
pub fn clear_formatting_command() -> Command {
    chain_command(
        "clearFormatting",
        Category::InlineFormat,
        labels::CLEAR_FORMATTING,
        "eraser",
        [EditorOp::UnsetAllMarks, EditorOp::ClearNodes],
    )
}

/// Build the stock toolbar with the given heading levels.
pub fn build_registry(heading_levels: &[u8]) -> Result<CommandRegistry, RegistryError> {
    let headings: Vec<Command> = heading_levels.iter().copied().map(heading_command).collect();
    let heading_ids: Vec<_> = headings.iter().map(|c| c.id().clone()).collect();

    let mut builder = CommandRegistry::builder().command(active_when(
        chain_command(
            "paragraph",
            Category::BlockFormat,
            labels::PARAGRAPH,
            "pilcrow",
            [EditorOp::SetParagraph],
        ),
        NodeType::Paragraph,
    ));
    for heading in headings {
        builder = builder.command(heading);
    }

    let block_ids = std::iter::once("paragraph".into())
        .chain(heading_ids)
        .chain(["codeBlock".into(), "blockquote".into(), "horizontalRule".into()])
        .collect::<Vec<smol_str::SmolStr>>();

    builder
        .command(active_when(
            chain_command(
                "codeBlock",
                Category::BlockFormat,
                labels::CODE_BLOCK,
                "code",
                [EditorOp::ToggleCodeBlock],
            ),
            NodeType::CodeBlock,
        ))
        .command(active_when(
            chain_command(
                "blockquote",
                Category::BlockFormat,
                labels::BLOCKQUOTE,
                "quote",
                [EditorOp::ToggleBlockquote],
            ),
            NodeType::Blockquote,
        ))
        .command(chain_command(
            "horizontalRule",
            Category::Insertion,
            labels::HORIZONTAL_RULE,
            "minus",
            [EditorOp::SetHorizontalRule],
        ))
        .command(active_when(
            chain_command("bold", Category::InlineFormat, labels::BOLD, "bold", [EditorOp::ToggleBold]),
            NodeType::Bold,
        ))
        .command(active_when(
            chain_command(
                "italic",
                Category::InlineFormat,
                labels::ITALIC,
                "italic",
                [EditorOp::ToggleItalic],
            ),
            NodeType::Italic,
        ))
        .command(active_when(
            chain_command(
                "underline",
                Category::InlineFormat,
                labels::UNDERLINE,
                "underline",
                [EditorOp::ToggleUnderline],
            ),
            NodeType::Underline,
        ))
        .command(link_command())
        .command(active_when(
            chain_command(
                "bulletList",
                Category::ListFormat,
                labels::BULLET_LIST,
                "list",
                [EditorOp::ToggleBulletList],
            ),
            NodeType::BulletList,
        ))
        .command(active_when(
            chain_command(
                "orderedList",
                Category::ListFormat,
                labels::ORDERED_LIST,
                "list-ordered",
                [EditorOp::ToggleOrderedList],
            ),
            NodeType::OrderedList,
        ))
        .command(image_command())
        .command(history_command("undo", labels::UNDO, EditorOp::Undo))
        .command(history_command("redo", labels::REDO, EditorOp::Redo))
        .group(GroupKind::Block, block_ids)
        .group(GroupKind::Inline, ["bold", "italic", "underline", "link"])
        .group(GroupKind::List, ["bulletList", "orderedList"])
        .group(GroupKind::Insertion, ["imageUpload"])
        .group(GroupKind::History, ["undo", "redo"])
        .build()
}

/// The stock toolbar with headings 1–3.
pub fn default_registry() -> Result<CommandRegistry, RegistryError> {
    build_registry(&DEFAULT_HEADING_LEVELS)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::command::Invocation;
    use crate::handle::EditorHandle;
    use crate::headless::{HeadlessEditor, ScriptedHost};

    fn registry() -> CommandRegistry {
        default_registry().unwrap()
    }

    fn click(registry: &CommandRegistry, id: &str, editor: &mut HeadlessEditor) {
        let mut host = ScriptedHost::default();
        registry.get(id).unwrap().invoke(editor, &mut host).unwrap();
    }

    #[test]
    fn test_ids_unique() {
        let registry = registry();
        let ids: HashSet<_> = registry.iter().map(|c| c.id().clone()).collect();
        assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn test_group_layout() {
        let registry = registry();
        let layout: Vec<(GroupKind, Vec<&str>)> = registry
            .groups()
            .iter()
            .map(|g| (g.kind(), g.commands().iter().map(|c| c.id().as_str()).collect()))
            .collect();
        assert_eq!(
            layout,
            vec![
                (
                    GroupKind::Block,
                    vec!["paragraph", "h1", "h2", "h3", "codeBlock", "blockquote", "horizontalRule"]
                ),
                (GroupKind::Inline, vec!["bold", "italic", "underline", "link"]),
                (GroupKind::List, vec!["bulletList", "orderedList"]),
                (GroupKind::Insertion, vec!["imageUpload"]),
                (GroupKind::History, vec!["undo", "redo"]),
            ]
        );
    }

    #[test]
    fn test_heading_commands_close_over_level() {
        let registry = registry();
        let mut editor = HeadlessEditor::new();

        click(&registry, "h2", &mut editor);
        assert_eq!(editor.applied()[0], vec![EditorOp::Focus, EditorOp::ToggleHeading { level: 2 }]);

        assert!(registry.get("h2").unwrap().is_active(&editor));
        assert!(!registry.get("h1").unwrap().is_active(&editor));
        assert!(!registry.get("h3").unwrap().is_active(&editor));
        assert!(!registry.get("paragraph").unwrap().is_active(&editor));
    }

    #[test]
    fn test_undo_disabled_exactly_when_no_history() {
        let registry = registry();
        let undo = registry.get("undo").unwrap();
        let redo = registry.get("redo").unwrap();
        let mut editor = HeadlessEditor::new();

        assert!(undo.is_disabled(&editor));
        assert!(redo.is_disabled(&editor));

        click(&registry, "bold", &mut editor);
        assert!(!undo.is_disabled(&editor));
        assert!(redo.is_disabled(&editor));

        click(&registry, "undo", &mut editor);
        assert!(undo.is_disabled(&editor));
        assert!(!redo.is_disabled(&editor));

        click(&registry, "redo", &mut editor);
        assert!(!undo.is_disabled(&editor));
        assert!(redo.is_disabled(&editor));
    }

    #[test]
    fn test_link_command_prompts() {
        let registry = registry();
        let mut editor = HeadlessEditor::new();
        let mut host = ScriptedHost::with_responses([Some("https://example.com")]);

        registry.get("link").unwrap().invoke(&mut editor, &mut host).unwrap();
        assert_eq!(host.prompts, vec![("URL".to_string(), None)]);
        assert!(registry.get("link").unwrap().is_active(&editor));
    }

    #[test]
    fn test_image_command_is_picker() {
        let registry = registry();
        let image = registry.get("imageUpload").unwrap();
        assert!(matches!(image.invocation(), Invocation::PickImage));

        let mut editor = HeadlessEditor::new();
        assert!(!image.is_disabled(&editor));
        editor.set_editable(false);
        assert!(image.is_disabled(&editor));
    }

    #[test]
    fn test_clear_formatting() {
        let mut editor = HeadlessEditor::new();
        let mut host = ScriptedHost::default();
        editor.apply(&[EditorOp::ToggleBold, EditorOp::ToggleHeading { level: 1 }]);

        clear_formatting_command().invoke(&mut editor, &mut host).unwrap();
        assert!(!editor.is_active(NodeType::Bold, &NodeAttrs::default()));
        assert!(editor.is_active(NodeType::Paragraph, &NodeAttrs::default()));
    }

    #[test]
    fn test_custom_heading_levels() {
        let registry = build_registry(&[1, 4]).unwrap();
        assert!(registry.get("h4").is_some());
        assert!(registry.get("h2").is_none());
        assert_eq!(registry.list(Category::BlockFormat).count(), 5);
    }
}
