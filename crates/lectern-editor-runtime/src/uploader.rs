//! Image upload capability.

use std::future::Future;

use base64::{Engine, engine::general_purpose::STANDARD};
use lectern_editor_core::{FileData, UploadError, UploadPolicy};
use mime_sniffer::MimeTypeSniffer;

/// Turns an image file into a location the editor can reference.
pub trait ImageUploader {
    /// Upload `file` and resolve to its URL.
    fn upload(&self, file: &FileData) -> impl Future<Output = Result<String, UploadError>>;
}

/// Inlines images as base64 `data:` URLs. Nothing leaves the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlUploader;

impl ImageUploader for DataUrlUploader {
    async fn upload(&self, file: &FileData) -> Result<String, UploadError> {
        if file.data.is_empty() {
            return Err(UploadError::Read);
        }
        Ok(format!(
            "data:{};base64,{}",
            file.media_type,
            STANDARD.encode(&file.data)
        ))
    }
}

/// Fill in a missing media type by sniffing the file's bytes.
pub fn with_sniffed_type(mut file: FileData) -> FileData {
    if file.media_type.is_empty() {
        let sniffed = file
            .data
            .sniff_mime_type()
            .unwrap_or("application/octet-stream");
        tracing::debug!(name = %file.name, sniffed, "no declared media type");
        file.media_type = sniffed.into();
    }
    file
}

/// Validate `file` against `policy`, then upload it.
///
/// Nothing is uploaded if validation fails.
pub async fn validate_and_upload<U: ImageUploader>(
    policy: &UploadPolicy,
    uploader: &U,
    file: FileData,
) -> Result<String, UploadError> {
    let file = with_sniffed_type(file);
    policy.validate(&file)?;
    uploader.upload(&file).await
}
