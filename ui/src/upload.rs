//! The upload pipeline: one binary payload in, one stored object plus a
//! metadata row out.

use api::storage::object_key;
use chrono::Utc;
use dioxus::prelude::*;
use wedding_types::NewPhotoRecord;
use wedding_types::PhotoRecord;

use crate::client_config::ResolvedConfig;
use crate::error::ShareError;
use crate::storage_session::StorageSession;

pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

/// Name recorded with an upload when the guest leaves the field blank.
pub const DEFAULT_GUEST_NAME: &str = "Guest";

pub fn uploader_name(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        DEFAULT_GUEST_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Runs the whole pipeline for one payload. Callers guard that a frame or
/// file actually exists before building `bytes`; a hard failure here leaves
/// whatever produced the payload untouched so the guest can retry.
pub async fn upload_photo_bytes(
    config: &ResolvedConfig,
    mut session: Signal<StorageSession>,
    bytes: Vec<u8>,
    uploaded_by: String,
) -> Result<PhotoRecord, ShareError> {
    let params = config.storage_params()?;
    let client = session.write().client(&params)?;

    let key = object_key(Utc::now());
    client
        .upload_object(&key, bytes, JPEG_CONTENT_TYPE)
        .await
        .map_err(|err| ShareError::StorageWrite(err.to_string()))?;

    let public_url = client.object_public_url(&key);

    // The binary is already stored; a failed metadata insert must not fail
    // the upload.
    let record = NewPhotoRecord {
        file_name: key.clone(),
        public_url: public_url.clone(),
        uploaded_by: uploaded_by.clone(),
    };
    if let Err(err) = client.insert_photo(&record).await {
        dioxus_logger::tracing::warn!("metadata insert failed for {key}: {err}");
    }

    Ok(PhotoRecord {
        file_name: key,
        public_url,
        uploaded_by,
        created_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_guest_names_fall_back_to_the_default() {
        assert_eq!(uploader_name(""), DEFAULT_GUEST_NAME);
        assert_eq!(uploader_name("   "), DEFAULT_GUEST_NAME);
        assert_eq!(uploader_name("  Ada  "), "Ada");
    }
}
