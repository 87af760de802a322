//! Uploading images dropped onto the editor.

use std::sync::Mutex;

use lectern_editor_core::{CommandChain, EditorHandle, FileData, Host, SmolStr, UploadError, UploadPolicy};

use crate::lock;
use crate::uploader::{ImageUploader, validate_and_upload};

/// Outcome of a drop batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DropReport {
    /// Inserted image URLs, in drop order.
    pub inserted: Vec<String>,
    /// Files that failed, with the reason shown to the user.
    pub failed: Vec<(SmolStr, UploadError)>,
}

/// Upload dropped images one after another, inserting each at the cursor as
/// it resolves.
///
/// A failed file is reported through `host.alert` and skipped; the rest of
/// the batch still runs.
pub async fn upload_dropped_images<E, U>(
    files: Vec<FileData>,
    policy: &UploadPolicy,
    uploader: &U,
    editor: &Mutex<E>,
    host: &mut dyn Host,
) -> DropReport
where
    E: EditorHandle,
    U: ImageUploader,
{
    let mut report = DropReport::default();
    for file in files {
        let name = file.name.clone();
        match validate_and_upload(policy, uploader, file).await {
            Ok(url) => {
                let applied = CommandChain::new()
                    .focus()
                    .set_image(url.clone())
                    .run(&mut *lock(editor));
                if applied {
                    report.inserted.push(url);
                } else {
                    tracing::warn!(%name, "editor rejected dropped image");
                }
            }
            Err(err) => {
                tracing::warn!(%name, "dropped image failed: {err}");
                host.alert(&err.to_string());
                report.failed.push((name, err));
            }
        }
    }
    report
}
