//! Drop and paste interception.
//!
//! Both entry points decide synchronously whether the engine's default
//! handling must be suppressed. Anything asynchronous (uploading dropped
//! images) is returned as a plan for the runtime to execute.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::handle::EditorHandle;
use crate::markdown::MarkdownConverter;
use crate::types::CommandChain;
use crate::upload::FileData;

/// Whether an interception point consumed the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterceptionDecision {
    /// The engine must skip its default handling.
    pub handled: bool,
}

impl InterceptionDecision {
    pub const HANDLED: Self = Self { handled: true };
    pub const DEFAULT: Self = Self { handled: false };
}

/// A drop event as seen by the editor.
#[derive(Debug, Clone, Default)]
pub struct DropEvent {
    pub files: Vec<FileData>,
    /// The drop is a move of existing editor content.
    pub moved: bool,
}

/// What to do with a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPlan {
    /// Let the engine handle it.
    Default,
    /// Suppress the default and upload these images, in order.
    UploadImages(Vec<FileData>),
}

impl DropPlan {
    pub fn decision(&self) -> InterceptionDecision {
        match self {
            Self::Default => InterceptionDecision::DEFAULT,
            Self::UploadImages(_) => InterceptionDecision::HANDLED,
        }
    }
}

/// Decide how to handle a drop.
pub fn evaluate_drop(event: DropEvent) -> DropPlan {
    if event.moved {
        return DropPlan::Default;
    }

    let total = event.files.len();
    let images: Vec<FileData> = event.files.into_iter().filter(FileData::is_image).collect();
    if images.is_empty() {
        tracing::debug!(total, "drop has no images");
        return DropPlan::Default;
    }

    tracing::debug!(total, images = images.len(), "intercepting image drop");
    DropPlan::UploadImages(images)
}

static MARKDOWN_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#+\s|\*\s|-\s|>\s|```)").unwrap());

/// True if any line of `text` opens with block-level markdown syntax.
pub fn looks_like_markdown(text: &str) -> bool {
    MARKDOWN_LINE.is_match(text)
}

/// Convert and insert pasted text that looks like markdown.
///
/// Returns `HANDLED` only if the engine applied the insert, so a rejected
/// paste falls back to the engine's default handling.
pub fn intercept_paste(
    text: Option<&str>,
    converter: &dyn MarkdownConverter,
    editor: &mut dyn EditorHandle,
) -> InterceptionDecision {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return InterceptionDecision::DEFAULT;
    };
    if !looks_like_markdown(text) {
        return InterceptionDecision::DEFAULT;
    }

    let html = converter.to_html(text);
    tracing::debug!(len = text.len(), "pasting markdown as html");
    if CommandChain::new().focus().insert_content(html, true).run(editor) {
        InterceptionDecision::HANDLED
    } else {
        tracing::debug!("engine rejected pasted markdown");
        InterceptionDecision::DEFAULT
    }
}
