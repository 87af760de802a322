//! Editor operations and node types.
//!
//! Platform-agnostic vocabulary for talking to the rich-text engine. `NodeType`
//! names the nodes and marks the toolbar asks about, `EditorOp` is a single
//! engine command, and `CommandChain` batches ops into one atomic transaction
//! the way the engine's `chain().focus()...run()` API does.

use smol_str::SmolStr;

use crate::handle::EditorHandle;

/// Node and mark types known to the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    // === Block nodes ===
    Paragraph,
    Heading,
    BulletList,
    OrderedList,
    ListItem,
    CodeBlock,
    Blockquote,
    HorizontalRule,
    Image,

    // === Marks ===
    Bold,
    Italic,
    Underline,
    Link,
}

impl NodeType {
    /// Schema name of the node or mark, as used in the engine's JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::BulletList => "bulletList",
            Self::OrderedList => "orderedList",
            Self::ListItem => "listItem",
            Self::CodeBlock => "codeBlock",
            Self::Blockquote => "blockquote",
            Self::HorizontalRule => "horizontalRule",
            Self::Image => "image",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Link => "link",
        }
    }

    /// Whether this is an inline mark rather than a node.
    pub fn is_mark(&self) -> bool {
        matches!(self, Self::Bold | Self::Italic | Self::Underline | Self::Link)
    }
}

/// Attributes used to narrow an active-state query or describe a node.
///
/// Only fields that are `Some` take part in matching, so
/// `NodeAttrs::default()` matches any node of the queried type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeAttrs {
    pub level: Option<u8>,
    pub href: Option<SmolStr>,
    pub src: Option<SmolStr>,
}

impl NodeAttrs {
    pub fn level(level: u8) -> Self {
        Self {
            level: Some(level),
            ..Self::default()
        }
    }

    pub fn href(href: impl Into<SmolStr>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::default()
        }
    }

    /// Check whether `other` satisfies every attribute set on `self`.
    pub fn matches(&self, other: &NodeAttrs) -> bool {
        fn field<T: PartialEq>(want: &Option<T>, have: &Option<T>) -> bool {
            want.as_ref().is_none_or(|w| have.as_ref() == Some(w))
        }
        field(&self.level, &other.level)
            && field(&self.href, &other.href)
            && field(&self.src, &other.src)
    }
}

/// A single engine command.
///
/// These are the operations the toolbar and the interception layer issue.
/// How each one changes the document is entirely up to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOp {
    /// Move focus back into the editor.
    Focus,

    // === Block formatting ===
    SetParagraph,
    ToggleHeading { level: u8 },
    ToggleCodeBlock,
    ToggleBlockquote,
    ToggleBulletList,
    ToggleOrderedList,

    // === Inline formatting ===
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    /// Extend the selection to cover the whole mark around the cursor.
    ExtendMarkRange(NodeType),
    SetLink { href: String },
    UnsetLink,
    UnsetAllMarks,
    ClearNodes,

    // === Insertion ===
    SetHorizontalRule,
    SetImage { src: String },
    /// Insert markup at the cursor.
    InsertContent { html: String, preserve_whitespace: bool },

    // === History ===
    Undo,
    Redo,
}

impl EditorOp {
    /// Whether the op only moves focus/selection and never edits content.
    pub fn is_selection_only(&self) -> bool {
        matches!(self, Self::Focus | Self::ExtendMarkRange(_))
    }
}

/// Builder for an atomic chain of editor ops.
///
/// Mirrors the engine's chaining API: ops are collected and handed to
/// `EditorHandle::apply` in one call, which applies all of them or none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use = "a command chain does nothing until `run` is called"]
pub struct CommandChain {
    ops: Vec<EditorOp>,
}

impl CommandChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn op(mut self, op: EditorOp) -> Self {
        self.ops.push(op);
        self
    }

    pub fn focus(self) -> Self {
        self.op(EditorOp::Focus)
    }

    pub fn set_paragraph(self) -> Self {
        self.op(EditorOp::SetParagraph)
    }

    pub fn toggle_heading(self, level: u8) -> Self {
        self.op(EditorOp::ToggleHeading { level })
    }

    pub fn toggle_bold(self) -> Self {
        self.op(EditorOp::ToggleBold)
    }

    pub fn toggle_italic(self) -> Self {
        self.op(EditorOp::ToggleItalic)
    }

    pub fn toggle_underline(self) -> Self {
        self.op(EditorOp::ToggleUnderline)
    }

    pub fn extend_mark_range(self, mark: NodeType) -> Self {
        self.op(EditorOp::ExtendMarkRange(mark))
    }

    pub fn set_link(self, href: impl Into<String>) -> Self {
        self.op(EditorOp::SetLink { href: href.into() })
    }

    pub fn unset_link(self) -> Self {
        self.op(EditorOp::UnsetLink)
    }

    pub fn set_image(self, src: impl Into<String>) -> Self {
        self.op(EditorOp::SetImage { src: src.into() })
    }

    pub fn insert_content(self, html: impl Into<String>, preserve_whitespace: bool) -> Self {
        self.op(EditorOp::InsertContent {
            html: html.into(),
            preserve_whitespace,
        })
    }

    pub fn undo(self) -> Self {
        self.op(EditorOp::Undo)
    }

    pub fn redo(self) -> Self {
        self.op(EditorOp::Redo)
    }

    pub fn ops(&self) -> &[EditorOp] {
        &self.ops
    }

    /// Check whether every op in the chain can currently execute.
    pub fn can_run(&self, editor: &dyn EditorHandle) -> bool {
        self.ops.iter().all(|op| editor.can(op))
    }

    /// Apply the chain. Returns true if the engine accepted it.
    pub fn run(self, editor: &mut dyn EditorHandle) -> bool {
        if self.ops.is_empty() {
            return false;
        }
        let applied = editor.apply(&self.ops);
        if !applied {
            tracing::debug!(ops = ?self.ops, "editor rejected command chain");
        }
        applied
    }
}
