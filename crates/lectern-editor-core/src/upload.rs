//! Image upload validation.
//!
//! Validation is synchronous and always runs before any upload is attempted.
//! The uploaders themselves live in the runtime crate.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// A file handed over by the picker, a drop or a paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    pub name: SmolStr,
    /// Declared media type. May be empty if the platform did not report one.
    pub media_type: SmolStr,
    pub data: Bytes,
}

impl FileData {
    pub fn new(name: impl Into<SmolStr>, media_type: impl Into<SmolStr>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// Errors from validating or uploading an image.
///
/// Display strings are shown to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UploadError {
    #[error("Invalid file type. Accepted types: {}", accepted.join(", "))]
    UnsupportedType { media_type: SmolStr, accepted: Vec<SmolStr> },

    #[error("File is too large. Max size: {max_mb}MB")]
    TooLarge { size: u64, max_mb: u32 },

    #[error("Error reading file for preview.")]
    Read,

    #[error("Upload failed: {0}")]
    Transport(String),
}

/// Accepted media types and the size ceiling for uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    pub accepted_types: Vec<SmolStr>,
    pub max_file_size_mb: u32,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            accepted_types: ["image/jpeg", "image/png", "image/gif", "image/webp"]
                .into_iter()
                .map(SmolStr::new_static)
                .collect(),
            max_file_size_mb: 5,
        }
    }
}

impl UploadPolicy {
    pub fn max_bytes(&self) -> u64 {
        u64::from(self.max_file_size_mb) * 1024 * 1024
    }

    /// Value for a file input's `accept` attribute.
    pub fn accept_attribute(&self) -> String {
        self.accepted_types.join(",")
    }

    pub fn validate(&self, file: &FileData) -> Result<(), UploadError> {
        self.validate_parts(&file.media_type, file.size())
    }

    /// Type is checked before size, so an oversized file of the wrong type
    /// reports the type.
    pub fn validate_parts(&self, media_type: &str, size: u64) -> Result<(), UploadError> {
        if !self.accepted_types.iter().any(|t| t.as_str() == media_type) {
            return Err(UploadError::UnsupportedType {
                media_type: media_type.into(),
                accepted: self.accepted_types.clone(),
            });
        }
        if size > self.max_bytes() {
            return Err(UploadError::TooLarge {
                size,
                max_mb: self.max_file_size_mb,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn test_accepts_small_png() {
        let policy = UploadPolicy::default();
        assert_eq!(policy.validate_parts("image/png", MIB), Ok(()));
        assert_eq!(policy.validate_parts("image/webp", 5 * MIB), Ok(()));
    }

    #[test]
    fn test_rejects_pdf() {
        let err = UploadPolicy::default()
            .validate_parts("application/pdf", 10)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid file type. Accepted types: image/jpeg, image/png, image/gif, image/webp"
        );
    }

    #[test]
    fn test_rejects_oversized() {
        let err = UploadPolicy::default()
            .validate_parts("image/png", 6 * MIB)
            .unwrap_err();
        assert_eq!(err.to_string(), "File is too large. Max size: 5MB");
    }

    #[test]
    fn test_type_checked_before_size() {
        let err = UploadPolicy::default()
            .validate_parts("image/svg+xml", 60 * MIB)
            .unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType { .. }));
    }

    #[test]
    fn test_validate_file() {
        let policy = UploadPolicy {
            max_file_size_mb: 1,
            ..UploadPolicy::default()
        };
        let small = FileData::new("a.gif", "image/gif", vec![0u8; 16]);
        let big = FileData::new("b.gif", "image/gif", vec![0u8; (MIB + 1) as usize]);
        assert!(small.is_image());
        assert_eq!(policy.validate(&small), Ok(()));
        assert!(matches!(
            policy.validate(&big),
            Err(UploadError::TooLarge { max_mb: 1, .. })
        ));
    }

    #[test]
    fn test_accept_attribute() {
        assert_eq!(
            UploadPolicy::default().accept_attribute(),
            "image/jpeg,image/png,image/gif,image/webp"
        );
    }
}
