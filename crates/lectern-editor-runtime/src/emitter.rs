//! Debounced change notifications.

use std::sync::{Arc, Mutex};

use lectern_editor_core::{ContentSnapshot, EditorHandle};
use n0_future::time::Duration;

use crate::debounce::Debouncer;
use crate::lock;

/// Something a snapshot can be taken from when the debounce fires.
pub trait SnapshotSource: Send + 'static {
    fn snapshot(&self) -> ContentSnapshot;
}

impl SnapshotSource for ContentSnapshot {
    fn snapshot(&self) -> ContentSnapshot {
        self.clone()
    }
}

impl<E: EditorHandle + Send + 'static> SnapshotSource for Arc<Mutex<E>> {
    fn snapshot(&self) -> ContentSnapshot {
        ContentSnapshot::from_editor(&*lock(&**self))
    }
}

/// Emits a content snapshot once editing goes quiet.
///
/// The snapshot is serialized when the timer fires, so bursts of edits cost
/// one serialization.
#[derive(Debug)]
pub struct ChangeEmitter<S> {
    debouncer: Debouncer<S>,
}

impl<S: SnapshotSource> ChangeEmitter<S> {
    pub fn new<F>(delay: Duration, on_change: F) -> Self
    where
        F: Fn(ContentSnapshot) + Send + Sync + 'static,
    {
        Self {
            debouncer: Debouncer::new(delay, move |source: S| {
                let snapshot = source.snapshot();
                tracing::debug!(html_len = snapshot.html.len(), "content changed");
                on_change(snapshot);
            }),
        }
    }

    /// Record that the content changed.
    pub fn notify(&self, source: S) {
        self.debouncer.call(source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_editor_core::EditorOp;
    use lectern_editor_core::headless::HeadlessEditor;

    fn collector() -> (Arc<Mutex<Vec<ContentSnapshot>>>, impl Fn(ContentSnapshot) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |s: ContentSnapshot| sink.lock().unwrap().push(s))
    }

    #[tokio::test(start_paused = true)]
    async fn test_serializes_latest_state_on_fire() {
        let editor = Arc::new(Mutex::new(HeadlessEditor::with_content("<p>a</p>")));
        let (seen, on_change) = collector();
        let emitter = ChangeEmitter::new(Duration::from_millis(300), on_change);

        emitter.notify(editor.clone());
        editor.lock().unwrap().apply(&[EditorOp::SetHorizontalRule]);
        emitter.notify(editor.clone());
        editor.lock().unwrap().apply(&[EditorOp::SetImage { src: "x.png".into() }]);

        tokio::time::sleep(Duration::from_millis(400)).await;
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].html, "<p>a</p><hr><img src=\"x.png\">");
    }

    #[tokio::test(start_paused = true)]
    async fn test_plain_snapshots() {
        let (seen, on_change) = collector();
        let emitter = ChangeEmitter::new(Duration::from_millis(300), on_change);
        for html in ["<p>1</p>", "<p>2</p>"] {
            emitter.notify(ContentSnapshot {
                html: html.into(),
                json: serde_json::Value::Null,
            });
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        let htmls: Vec<_> = seen.lock().unwrap().iter().map(|s| s.html.clone()).collect();
        assert_eq!(htmls, ["<p>1</p>", "<p>2</p>"]);
    }
}
