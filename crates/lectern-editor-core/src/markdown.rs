//! Markdown to HTML conversion for pasted text.

use pulldown_cmark::{Options, Parser, html};

/// Converts markdown source to HTML.
pub trait MarkdownConverter {
    fn to_html(&self, markdown: &str) -> String;
}

impl<F> MarkdownConverter for F
where
    F: Fn(&str) -> String,
{
    fn to_html(&self, markdown: &str) -> String {
        self(markdown)
    }
}

/// CommonMark converter with the GFM extensions pasted content commonly uses.
#[derive(Debug, Clone, Copy)]
pub struct CmarkConverter {
    options: Options,
}

impl Default for CmarkConverter {
    fn default() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        Self { options }
    }
}

impl CmarkConverter {
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }
}

impl MarkdownConverter for CmarkConverter {
    fn to_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_list() {
        let html = CmarkConverter::default().to_html("# Title\n\n- one\n- two\n");
        assert_eq!(html, "<h1>Title</h1>\n<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n");
    }

    #[test]
    fn test_strikethrough_enabled() {
        let html = CmarkConverter::default().to_html("~~gone~~");
        assert_eq!(html, "<p><del>gone</del></p>\n");
    }

    #[test]
    fn test_closure_converter() {
        let upper = |s: &str| s.to_uppercase();
        assert_eq!(upper.to_html("abc"), "ABC");
    }
}
