//! One editor instance with its toolbar, shell and change stream.

use std::sync::{Arc, Mutex};

use lectern_editor_core::defaults::build_registry;
use lectern_editor_core::{
    ClickOutcome, CmarkConverter, CommandError, CommandRegistry, ContentSnapshot, DropEvent, DropPlan,
    EditorConfig, EditorHandle, FileData, Host, InterceptionDecision, LecternError, LinkAction, LinkBubble,
    MarkdownConverter, OutputShell, OutputView, PreferenceError, PreferenceStore, SystemAppearance, Theme,
    ThemeState, Toolbar, ToolbarView, UploadError, evaluate_drop, intercept_paste, link_bubble, run_link_action,
};

use crate::dropped::{DropReport, upload_dropped_images};
use crate::emitter::ChangeEmitter;
use crate::lock;
use crate::picker::upload_picked_image;
use crate::uploader::ImageUploader;

type ChangeCallback = Arc<dyn Fn(&ContentSnapshot) + Send + Sync>;
type Converter = Box<dyn MarkdownConverter + Send + Sync>;

/// Builder for [`EditorSession`].
pub struct SessionBuilder<E, S> {
    config: EditorConfig,
    editor: E,
    store: S,
    registry: Option<CommandRegistry>,
    converter: Option<Converter>,
    on_change: Option<ChangeCallback>,
}

impl<E, S> SessionBuilder<E, S>
where
    E: EditorHandle + Send + 'static,
    S: PreferenceStore + Send + 'static,
{
    pub fn new(config: EditorConfig, editor: E, store: S) -> Self {
        Self {
            config,
            editor,
            store,
            registry: None,
            converter: None,
            on_change: None,
        }
    }

    /// Replace the stock toolbar.
    pub fn registry(mut self, registry: CommandRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn converter(mut self, converter: impl MarkdownConverter + Send + Sync + 'static) -> Self {
        self.converter = Some(Box::new(converter));
        self
    }

    /// Called with each debounced snapshot, before the shell stores it.
    pub fn on_change(mut self, callback: impl Fn(&ContentSnapshot) + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(callback));
        self
    }

    pub fn build<U: ImageUploader>(
        self,
        uploader: U,
        appearance: &dyn SystemAppearance,
    ) -> Result<EditorSession<E, U, S>, LecternError> {
        self.config.validate()?;
        let registry = match self.registry {
            Some(registry) => registry,
            None => build_registry(&self.config.heading_levels)?,
        };

        let mut toolbar = Toolbar::new(Arc::new(registry)).with_upload_policy(&self.config.upload);
        toolbar.set_editable(self.config.editable);
        let mut editor = self.editor;
        editor.set_editable(self.config.editable);

        let theme = ThemeState::load(self.store, self.config.theme_key.clone(), appearance);
        let shell = Arc::new(Mutex::new(OutputShell::new(theme)));

        let emitter = {
            let shell = shell.clone();
            let on_change = self.on_change;
            ChangeEmitter::new(self.config.debounce_interval(), move |snapshot| {
                if let Some(callback) = &on_change {
                    callback(&snapshot);
                }
                lock(&shell).apply_snapshot(snapshot);
            })
        };

        Ok(EditorSession {
            config: self.config,
            editor: Arc::new(Mutex::new(editor)),
            toolbar: Mutex::new(toolbar),
            shell,
            emitter,
            uploader,
            converter: self
                .converter
                .unwrap_or_else(|| Box::new(CmarkConverter::default())),
        })
    }
}

/// Wires an engine to the toolbar, interception, change stream and shell.
///
/// Every mutation made through the session schedules a change notification.
/// Engines that change on their own (typing) report it with
/// [`EditorSession::content_changed`].
pub struct EditorSession<E, U, S> {
    config: EditorConfig,
    editor: Arc<Mutex<E>>,
    toolbar: Mutex<Toolbar>,
    shell: Arc<Mutex<OutputShell<S>>>,
    emitter: ChangeEmitter<Arc<Mutex<E>>>,
    uploader: U,
    converter: Converter,
}

impl<E, U, S> EditorSession<E, U, S>
where
    E: EditorHandle + Send + 'static,
    U: ImageUploader,
    S: PreferenceStore + Send + 'static,
{
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Shared handle to the engine.
    pub fn editor(&self) -> &Arc<Mutex<E>> {
        &self.editor
    }

    /// The engine has mounted. Returns false if it already had.
    pub fn mount(&self) -> bool {
        lock(&self.toolbar).mark_ready()
    }

    /// Switch the engine and the toolbar between editable and read-only.
    pub fn set_editable(&self, editable: bool) {
        let mut editor = lock(&self.editor);
        editor.set_editable(editable);
        lock(&self.toolbar).set_editable(editable);
    }

    /// Whether edits made through the session reach the document.
    pub fn is_editable(&self) -> bool {
        let editor = lock(&self.editor);
        let toolbar = lock(&self.toolbar);
        toolbar.is_editable() && editor.is_editable()
    }

    /// Text to show while the document is empty.
    pub fn placeholder(&self) -> Option<&str> {
        lock(&self.editor)
            .is_empty()
            .then_some(self.config.placeholder.as_str())
    }

    /// Schedule a change notification.
    pub fn content_changed(&self) {
        self.emitter.notify(self.editor.clone());
    }

    pub fn render_toolbar(&self) -> ToolbarView {
        let editor = lock(&self.editor);
        lock(&self.toolbar).render(Some(&*editor))
    }

    pub fn click(&self, id: &str, host: &mut dyn Host) -> Result<ClickOutcome, CommandError> {
        let outcome = {
            let mut editor = lock(&self.editor);
            lock(&self.toolbar).click(id, Some(&mut *editor), host)?
        };
        if outcome == ClickOutcome::Invoked {
            self.content_changed();
        }
        Ok(outcome)
    }

    pub fn picker_dismissed(&self) {
        lock(&self.toolbar).picker_dismissed();
    }

    /// Handle the file chosen in the image picker.
    pub async fn image_selected(&self, file: FileData, host: &mut dyn Host) -> Result<String, UploadError> {
        let result = upload_picked_image(
            file,
            &self.config.upload,
            &self.uploader,
            &*self.editor,
            &self.toolbar,
            host,
        )
        .await;
        if result.is_ok() {
            self.content_changed();
        }
        result
    }

    pub fn paste(&self, text: Option<&str>) -> InterceptionDecision {
        if !self.is_editable() {
            return InterceptionDecision::DEFAULT;
        }
        let decision = intercept_paste(text, &*self.converter, &mut *lock(&self.editor));
        if decision.handled {
            self.content_changed();
        }
        decision
    }

    /// Decide on a drop. The decision is available immediately; any uploads
    /// run when the returned plan is passed to [`EditorSession::run_drop`].
    pub fn drop_files(&self, event: DropEvent) -> DropPlan {
        if !self.is_editable() {
            tracing::debug!("drop on read-only editor");
            return DropPlan::Default;
        }
        evaluate_drop(event)
    }

    pub async fn run_drop(&self, plan: DropPlan, host: &mut dyn Host) -> DropReport {
        let DropPlan::UploadImages(files) = plan else {
            return DropReport::default();
        };
        if !self.is_editable() {
            return DropReport::default();
        }
        let report =
            upload_dropped_images(files, &self.config.upload, &self.uploader, &*self.editor, host).await;
        if !report.inserted.is_empty() {
            self.content_changed();
        }
        report
    }

    pub fn link_bubble(&self) -> LinkBubble {
        link_bubble(&*lock(&self.editor))
    }

    pub fn link_action(&self, action: LinkAction, host: &mut dyn Host) -> bool {
        if !self.is_editable() {
            return false;
        }
        let changed = run_link_action(action, &mut *lock(&self.editor), host);
        if changed {
            self.content_changed();
        }
        changed
    }

    pub fn theme(&self) -> Theme {
        lock(&self.shell).theme()
    }

    pub fn toggle_theme(&self) -> Result<Theme, PreferenceError> {
        lock(&self.shell).toggle_theme()
    }

    pub fn set_output_view(&self, view: OutputView) {
        lock(&self.shell).set_view(view);
    }

    /// Text of the output panel.
    pub fn output(&self) -> String {
        lock(&self.shell).render_output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uploader::DataUrlUploader;
    use lectern_editor_core::headless::{HeadlessEditor, ScriptedHost};
    use lectern_editor_core::{Availability, FixedAppearance, MemoryPreferenceStore};
    use n0_future::time::Duration;

    type TestSession = EditorSession<HeadlessEditor, DataUrlUploader, MemoryPreferenceStore>;

    fn session() -> TestSession {
        SessionBuilder::new(
            EditorConfig::default(),
            HeadlessEditor::new(),
            MemoryPreferenceStore::new(),
        )
        .build(DataUrlUploader, &FixedAppearance(false))
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_flows_to_output() {
        let session = session();
        let mut host = ScriptedHost::default();
        assert_eq!(session.render_toolbar().availability, Availability::Unready);
        assert!(session.mount());

        assert_eq!(session.click("horizontalRule", &mut host).unwrap(), ClickOutcome::Invoked);
        assert_eq!(session.output(), "");

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(session.output(), "<hr>");
        assert!(!session.render_toolbar().button("undo").unwrap().disabled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_edits_emits_once() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let session = SessionBuilder::new(
            EditorConfig::default(),
            HeadlessEditor::new(),
            MemoryPreferenceStore::new(),
        )
        .on_change(move |s| sink.lock().unwrap().push(s.html.clone()))
        .build(DataUrlUploader, &FixedAppearance(false))
        .unwrap();
        session.mount();

        let mut host = ScriptedHost::default();
        for _ in 0..3 {
            session.click("horizontalRule", &mut host).unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(*seen.lock().unwrap(), ["<hr><hr><hr>"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_paste_and_json_view() {
        let session = session();
        assert!(session.paste(Some("- one\n- two")).handled);
        assert!(!session.paste(Some("just words")).handled);

        tokio::time::sleep(Duration::from_millis(350)).await;
        session.set_output_view(OutputView::Json);
        let output = session.output();
        assert!(output.starts_with("{\n"));
        assert!(output.contains("<li>one</li>"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_uploads() {
        let session = session();
        let mut host = ScriptedHost::default();
        let plan = session.drop_files(DropEvent {
            files: vec![
                FileData::new("a.png", "image/png", vec![1u8; 8]),
                FileData::new("b.txt", "text/plain", vec![1u8; 8]),
            ],
            moved: false,
        });
        assert!(plan.decision().handled);

        let report = session.run_drop(plan, &mut host).await;
        assert_eq!(report.inserted.len(), 1);
        assert_eq!(lock(session.editor()).images().len(), 1);

        let none = session.drop_files(DropEvent::default());
        assert!(!none.decision().handled);
        assert_eq!(session.run_drop(none, &mut host).await, DropReport::default());
    }

    #[tokio::test]
    async fn test_picker_round_trip() {
        let session = session();
        session.mount();
        let mut host = ScriptedHost::default();
        assert_eq!(session.click("imageUpload", &mut host).unwrap(), ClickOutcome::PickerOpened);
        assert_eq!(host.pickers, ["image/jpeg,image/png,image/gif,image/webp"]);

        let err = session
            .image_selected(FileData::new("x.bmp", "image/bmp", vec![1u8; 8]), &mut host)
            .await
            .unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType { .. }));
        assert_eq!(host.alerts.len(), 1);
    }

    #[test]
    fn test_theme_toggles_and_persists() {
        let session = session();
        assert_eq!(session.theme(), Theme::Light);
        assert_eq!(session.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(session.toggle_theme().unwrap(), Theme::Light);
    }

    #[test]
    fn test_link_bubble() {
        let session = session();
        lock(session.editor()).set_selection(true);
        assert_eq!(session.link_bubble(), LinkBubble::Add);
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_only_leaves_document_alone() {
        let config = EditorConfig {
            editable: false,
            ..EditorConfig::default()
        };
        let session = SessionBuilder::new(config, HeadlessEditor::new(), MemoryPreferenceStore::new())
            .build(DataUrlUploader, &FixedAppearance(false))
            .unwrap();
        session.mount();
        let mut host = ScriptedHost::with_responses([Some("https://example.com".to_string())]);
        assert_eq!(session.render_toolbar().availability, Availability::ReadOnly);
        assert!(!session.is_editable());

        assert!(!session.paste(Some("# Heading\nbody")).handled);
        let plan = session.drop_files(DropEvent {
            files: vec![FileData::new("a.png", "image/png", vec![1u8; 8])],
            moved: false,
        });
        assert_eq!(plan, DropPlan::Default);
        let forced = DropPlan::UploadImages(vec![FileData::new("b.png", "image/png", vec![1u8; 8])]);
        assert_eq!(session.run_drop(forced, &mut host).await, DropReport::default());
        lock(session.editor()).set_selection(true);
        assert!(!session.link_action(LinkAction::Add, &mut host));

        let editor = lock(session.editor());
        assert!(editor.applied().is_empty());
        assert!(editor.is_empty());
        drop(editor);
        assert_eq!(session.placeholder(), Some("Start typing..."));

        session.set_editable(true);
        assert!(session.paste(Some("# Heading\nbody")).handled);
        assert_eq!(session.placeholder(), None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EditorConfig {
            heading_levels: vec![0],
            ..EditorConfig::default()
        };
        let result = SessionBuilder::new(config, HeadlessEditor::new(), MemoryPreferenceStore::new())
            .build(DataUrlUploader, &FixedAppearance(false));
        assert!(matches!(result, Err(LecternError::Config(_))));
    }
}
