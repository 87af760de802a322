//! The toolbar's image picker flow.

use std::sync::Mutex;

use lectern_editor_core::{CommandChain, EditorHandle, FileData, Host, Toolbar, UploadError, UploadPolicy};

use crate::lock;
use crate::uploader::{ImageUploader, validate_and_upload};

/// Upload the file chosen in the picker and insert it at the cursor.
///
/// Errors are shown with `host.alert` and returned. The picker is reset to
/// closed whatever happens.
pub async fn upload_picked_image<E, U>(
    file: FileData,
    policy: &UploadPolicy,
    uploader: &U,
    editor: &Mutex<E>,
    toolbar: &Mutex<Toolbar>,
    host: &mut dyn Host,
) -> Result<String, UploadError>
where
    E: EditorHandle,
    U: ImageUploader,
{
    let name = file.name.clone();
    let result = validate_and_upload(policy, uploader, file).await;
    lock(toolbar).reset_picker();

    match result {
        Ok(url) => {
            CommandChain::new()
                .focus()
                .set_image(url.clone())
                .run(&mut *lock(editor));
            Ok(url)
        }
        Err(err) => {
            tracing::warn!(%name, "image upload failed: {err}");
            host.alert(&err.to_string());
            Err(err)
        }
    }
}
