//! The shell around the editor: theme plus the serialized-output panel.

use serde::{Deserialize, Serialize};

use crate::defaults::labels;
use crate::handle::EditorHandle;
use crate::preference::{PreferenceError, PreferenceStore};
use crate::theme::{Theme, ThemeState};

/// Serialized editor content, replaced wholesale on each change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentSnapshot {
    pub html: String,
    pub json: serde_json::Value,
}

impl ContentSnapshot {
    pub fn from_editor(editor: &dyn EditorHandle) -> Self {
        Self {
            html: editor.html(),
            json: editor.json(),
        }
    }
}

/// Which serialization the output panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputView {
    #[default]
    Html,
    Json,
}

impl OutputView {
    /// Label of the button that selects this view.
    pub fn label(self) -> &'static str {
        match self {
            Self::Html => labels::VIEW_HTML,
            Self::Json => labels::VIEW_JSON,
        }
    }
}

/// Theme, latest content snapshot and output view.
#[derive(Debug)]
pub struct OutputShell<S> {
    theme: ThemeState<S>,
    snapshot: ContentSnapshot,
    view: OutputView,
}

impl<S: PreferenceStore> OutputShell<S> {
    pub fn new(theme: ThemeState<S>) -> Self {
        Self {
            theme,
            snapshot: ContentSnapshot::default(),
            view: OutputView::default(),
        }
    }

    /// Replace the stored snapshot.
    pub fn apply_snapshot(&mut self, snapshot: ContentSnapshot) {
        self.snapshot = snapshot;
    }

    pub fn snapshot(&self) -> &ContentSnapshot {
        &self.snapshot
    }

    pub fn set_view(&mut self, view: OutputView) {
        self.view = view;
    }

    pub fn view(&self) -> OutputView {
        self.view
    }

    /// Text for the output panel in the current view. JSON is pretty-printed.
    pub fn render_output(&self) -> String {
        match self.view {
            OutputView::Html => self.snapshot.html.clone(),
            OutputView::Json => serde_json::to_string_pretty(&self.snapshot.json)
                .unwrap_or_else(|_| self.snapshot.json.to_string()),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, PreferenceError> {
        self.theme.toggle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessEditor;
    use crate::preference::MemoryPreferenceStore;
    use crate::theme::FixedAppearance;

    fn shell() -> OutputShell<MemoryPreferenceStore> {
        OutputShell::new(ThemeState::load(
            MemoryPreferenceStore::new(),
            "theme",
            &FixedAppearance(false),
        ))
    }

    #[test]
    fn test_starts_empty_in_html_view() {
        let shell = shell();
        assert_eq!(shell.view(), OutputView::Html);
        assert_eq!(shell.render_output(), "");
        assert_eq!(shell.view().label(), "View HTML");
    }

    #[test]
    fn test_views_render_latest_snapshot() {
        let mut shell = shell();
        let editor = HeadlessEditor::with_content("<p>hi</p>");
        shell.apply_snapshot(ContentSnapshot::from_editor(&editor));
        assert_eq!(shell.render_output(), "<p>hi</p>");

        shell.set_view(OutputView::Json);
        shell.apply_snapshot(ContentSnapshot {
            html: "<hr>".into(),
            json: serde_json::json!({ "content": [{ "type": "horizontalRule" }] }),
        });
        insta::assert_snapshot!(shell.render_output(), @r#"
        {
          "content": [
            {
              "type": "horizontalRule"
            }
          ]
        }
        "#);
    }

    #[test]
    fn test_toggle_theme() {
        let mut shell = shell();
        assert_eq!(shell.theme(), Theme::Light);
        assert_eq!(shell.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(shell.theme(), Theme::Dark);
    }
}
