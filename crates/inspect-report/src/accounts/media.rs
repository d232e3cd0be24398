//! Storage-key generation for uploaded images.
//!
//! The service never stores bytes itself; it validates that an upload looks
//! like an image and mints a deterministic-shaped key under `uploads/`.

use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use super::password::hex_encode;

const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MediaError {
    #[error("file name '{file_name}' has no recognizable extension")]
    MissingExtension { file_name: String },
    #[error("file name '{file_name}' does not resolve to an image type")]
    NotAnImage { file_name: String },
    #[error("upload declares zero bytes")]
    EmptyUpload,
    #[error("upload of {content_length} bytes exceeds the 10 MiB limit")]
    UploadTooLarge { content_length: u64 },
}

/// Build an `uploads/<prefix>/<token>.<ext>` key for an image upload.
/// Non-image extensions are rejected via `mime_guess`, and the declared byte
/// length must be non-zero and within the upload limit.
pub fn image_storage_key(
    prefix: &str,
    file_name: &str,
    content_length: u64,
) -> Result<String, MediaError> {
    if content_length == 0 {
        return Err(MediaError::EmptyUpload);
    }
    if content_length > MAX_UPLOAD_BYTES {
        return Err(MediaError::UploadTooLarge { content_length });
    }

    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .ok_or_else(|| MediaError::MissingExtension {
            file_name: file_name.to_string(),
        })?;

    let guessed = mime_guess::from_path(file_name)
        .first()
        .ok_or_else(|| MediaError::MissingExtension {
            file_name: file_name.to_string(),
        })?;
    if guessed.type_() != mime_guess::mime::IMAGE {
        return Err(MediaError::NotAnImage {
            file_name: file_name.to_string(),
        });
    }

    Ok(format!("uploads/{prefix}/{}.{extension}", upload_token(file_name)))
}

fn upload_token(file_name: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(file_name.as_bytes());
    hasher.update(nanos.to_le_bytes());
    let digest = hex_encode(&hasher.finalize());
    digest[..32].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_png_logo() {
        let key = image_storage_key("logo", "company-logo.PNG", 2048).expect("png accepted");
        assert!(key.starts_with("uploads/logo/"));
        assert!(key.ends_with(".png"));
    }

    #[test]
    fn rejects_non_image_extension() {
        let err = image_storage_key("logo", "notes.txt", 2048).expect_err("txt rejected");
        assert!(matches!(err, MediaError::NotAnImage { .. }));
    }

    #[test]
    fn rejects_missing_extension() {
        let err = image_storage_key("signature", "scan", 2048).expect_err("no extension");
        assert!(matches!(err, MediaError::MissingExtension { .. }));
    }

    #[test]
    fn rejects_zero_byte_upload() {
        let err = image_storage_key("logo", "logo.png", 0).expect_err("empty upload rejected");
        assert_eq!(err, MediaError::EmptyUpload);
    }

    #[test]
    fn rejects_oversize_upload() {
        let err = image_storage_key("logo", "logo.png", MAX_UPLOAD_BYTES + 1)
            .expect_err("oversize upload rejected");
        assert!(matches!(err, MediaError::UploadTooLarge { .. }));
    }

    #[test]
    fn distinct_uploads_get_distinct_keys() {
        let first = image_storage_key("signature", "sig.jpg", 2048).expect("jpg accepted");
        let second = image_storage_key("signature", "sig.jpg", 2048).expect("jpg accepted");
        assert_ne!(first, second);
    }
}
