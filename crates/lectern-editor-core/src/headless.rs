//! In-memory implementations of `EditorHandle` and `Host`.
//!
//! `HeadlessEditor` is a minimal stand-in for a real rich-text engine: it
//! tracks the block type and marks at a single cursor, appends inserted
//! content to a flat block list and keeps snapshot-based undo history. It is
//! enough to drive the toolbar and interception logic without a DOM, and every
//! chain it receives is recorded for inspection.

use std::collections::{BTreeSet, VecDeque};

use serde_json::json;
use smol_str::SmolStr;

use crate::config::EditorConfig;
use crate::handle::{EditorHandle, Host};
use crate::types::{EditorOp, NodeAttrs, NodeType};

/// A piece of content appended to the headless document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Markup(String),
    Image { src: String },
    HorizontalRule,
}

impl Block {
    fn html(&self) -> String {
        match self {
            Self::Markup(html) => html.clone(),
            Self::Image { src } => format!("<img src=\"{src}\">"),
            Self::HorizontalRule => "<hr>".to_string(),
        }
    }

    fn json(&self) -> serde_json::Value {
        match self {
            Self::Markup(html) => json!({ "type": "markup", "html": html }),
            Self::Image { src } => json!({ "type": NodeType::Image.name(), "attrs": { "src": src } }),
            Self::HorizontalRule => json!({ "type": NodeType::HorizontalRule.name() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DocState {
    blocks: Vec<Block>,
    block: NodeType,
    heading_level: Option<u8>,
    marks: BTreeSet<NodeType>,
    link: Option<SmolStr>,
}

impl Default for DocState {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            block: NodeType::Paragraph,
            heading_level: None,
            marks: BTreeSet::new(),
            link: None,
        }
    }
}

/// Headless editor engine.
#[derive(Debug, Clone)]
pub struct HeadlessEditor {
    state: DocState,
    undo_stack: Vec<DocState>,
    redo_stack: Vec<DocState>,
    history_depth: usize,
    editable: bool,
    focused: bool,
    selection: bool,
    applied: Vec<Vec<EditorOp>>,
}

impl Default for HeadlessEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessEditor {
    pub fn new() -> Self {
        Self {
            state: DocState::default(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            history_depth: 20,
            editable: true,
            focused: false,
            selection: false,
            applied: Vec::new(),
        }
    }

    /// Create an editor whose document starts with the given markup.
    pub fn with_content(html: impl Into<String>) -> Self {
        let mut editor = Self::new();
        editor.state.blocks.push(Block::Markup(html.into()));
        editor
    }

    /// Empty editor with the config's history depth and editable flag.
    pub fn from_config(config: &EditorConfig) -> Self {
        let mut editor = Self::new().with_history_depth(config.history_depth);
        editor.editable = config.editable;
        editor
    }

    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        self
    }

    pub fn set_selection(&mut self, selection: bool) {
        self.selection = selection;
    }

    /// Place the cursor inside a link without going through history.
    pub fn place_cursor_in_link(&mut self, href: Option<&str>) {
        self.state.link = href.map(SmolStr::new);
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Every chain the editor accepted, in order.
    pub fn applied(&self) -> &[Vec<EditorOp>] {
        &self.applied
    }

    pub fn blocks(&self) -> &[Block] {
        &self.state.blocks
    }

    /// Sources of all images in document order.
    pub fn images(&self) -> Vec<&str> {
        self.state
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Image { src } => Some(src.as_str()),
                _ => None,
            })
            .collect()
    }

    fn toggle_block(&mut self, node: NodeType) {
        if self.state.block == node {
            self.state.block = NodeType::Paragraph;
        } else {
            self.state.block = node;
        }
        self.state.heading_level = None;
    }

    fn toggle_mark(&mut self, mark: NodeType) {
        if !self.state.marks.remove(&mark) {
            self.state.marks.insert(mark);
        }
    }

    fn apply_op(&mut self, op: &EditorOp) {
        match op {
            EditorOp::Focus => self.focused = true,
            EditorOp::SetParagraph | EditorOp::ClearNodes => {
                self.state.block = NodeType::Paragraph;
                self.state.heading_level = None;
            }
            EditorOp::ToggleHeading { level } => {
                if self.state.block == NodeType::Heading && self.state.heading_level == Some(*level) {
                    self.state.block = NodeType::Paragraph;
                    self.state.heading_level = None;
                } else {
                    self.state.block = NodeType::Heading;
                    self.state.heading_level = Some(*level);
                }
            }
            EditorOp::ToggleCodeBlock => self.toggle_block(NodeType::CodeBlock),
            EditorOp::ToggleBlockquote => self.toggle_block(NodeType::Blockquote),
            EditorOp::ToggleBulletList => self.toggle_block(NodeType::BulletList),
            EditorOp::ToggleOrderedList => self.toggle_block(NodeType::OrderedList),
            EditorOp::ToggleBold => self.toggle_mark(NodeType::Bold),
            EditorOp::ToggleItalic => self.toggle_mark(NodeType::Italic),
            EditorOp::ToggleUnderline => self.toggle_mark(NodeType::Underline),
            EditorOp::ExtendMarkRange(_) => {}
            EditorOp::SetLink { href } => self.state.link = Some(SmolStr::new(href)),
            EditorOp::UnsetLink => self.state.link = None,
            EditorOp::UnsetAllMarks => {
                self.state.marks.clear();
                self.state.link = None;
            }
            EditorOp::SetHorizontalRule => self.state.blocks.push(Block::HorizontalRule),
            EditorOp::SetImage { src } => self.state.blocks.push(Block::Image { src: src.clone() }),
            EditorOp::InsertContent { html, .. } => self.state.blocks.push(Block::Markup(html.clone())),
            EditorOp::Undo => {
                if let Some(prev) = self.undo_stack.pop() {
                    let current = std::mem::replace(&mut self.state, prev);
                    self.redo_stack.push(current);
                }
            }
            EditorOp::Redo => {
                if let Some(next) = self.redo_stack.pop() {
                    let current = std::mem::replace(&mut self.state, next);
                    self.undo_stack.push(current);
                }
            }
        }
    }
}

impl EditorHandle for HeadlessEditor {
    fn is_active(&self, node: NodeType, attrs: &NodeAttrs) -> bool {
        match node {
            NodeType::Heading => {
                self.state.block == NodeType::Heading
                    && attrs.matches(&NodeAttrs {
                        level: self.state.heading_level,
                        ..NodeAttrs::default()
                    })
            }
            NodeType::Paragraph
            | NodeType::BulletList
            | NodeType::OrderedList
            | NodeType::CodeBlock
            | NodeType::Blockquote => self.state.block == node,
            NodeType::Bold | NodeType::Italic | NodeType::Underline => self.state.marks.contains(&node),
            NodeType::Link => self
                .state
                .link
                .as_ref()
                .is_some_and(|href| attrs.matches(&NodeAttrs::href(href.clone()))),
            NodeType::ListItem | NodeType::HorizontalRule | NodeType::Image => false,
        }
    }

    fn can(&self, op: &EditorOp) -> bool {
        match op {
            op if op.is_selection_only() => true,
            EditorOp::Undo => self.editable && !self.undo_stack.is_empty(),
            EditorOp::Redo => self.editable && !self.redo_stack.is_empty(),
            _ => self.editable,
        }
    }

    fn apply(&mut self, ops: &[EditorOp]) -> bool {
        if ops.iter().any(|op| !self.can(op)) {
            return false;
        }

        let before = self.state.clone();
        let is_history = ops.iter().any(|op| matches!(op, EditorOp::Undo | EditorOp::Redo));
        for op in ops {
            self.apply_op(op);
        }

        if !is_history && self.state != before {
            self.redo_stack.clear();
            self.undo_stack.push(before);
            while self.undo_stack.len() > self.history_depth {
                self.undo_stack.remove(0);
            }
        }

        self.applied.push(ops.to_vec());
        true
    }

    fn attributes(&self, node: NodeType) -> NodeAttrs {
        match node {
            NodeType::Heading if self.state.block == NodeType::Heading => NodeAttrs {
                level: self.state.heading_level,
                ..NodeAttrs::default()
            },
            NodeType::Link => NodeAttrs {
                href: self.state.link.clone(),
                ..NodeAttrs::default()
            },
            _ => NodeAttrs::default(),
        }
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    fn is_empty(&self) -> bool {
        self.state.blocks.is_empty()
    }

    fn has_selection(&self) -> bool {
        self.selection
    }

    fn html(&self) -> String {
        if self.state.blocks.is_empty() {
            return "<p></p>".to_string();
        }
        self.state.blocks.iter().map(Block::html).collect()
    }

    fn json(&self) -> serde_json::Value {
        let content: Vec<_> = self.state.blocks.iter().map(Block::json).collect();
        json!({ "type": "doc", "content": content })
    }
}

/// Host that answers prompts from a script and records everything else.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    /// Answers handed out to successive prompts. An exhausted script cancels.
    pub responses: VecDeque<Option<String>>,
    pub prompts: Vec<(String, Option<String>)>,
    pub alerts: Vec<String>,
    pub pickers: Vec<String>,
}

impl ScriptedHost {
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(|r| r.map(Into::into)).collect(),
            ..Self::default()
        }
    }
}

impl Host for ScriptedHost {
    fn prompt(&mut self, message: &str, default: Option<&str>) -> Option<String> {
        self.prompts
            .push((message.to_string(), default.map(str::to_string)));
        self.responses.pop_front().flatten()
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn open_file_picker(&mut self, accept: &str) {
        self.pickers.push(accept.to_string());
    }
}
