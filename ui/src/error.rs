//! User-facing error taxonomy for the capture, upload and gallery flows.
//! The `Display` strings double as the status line shown to guests.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ShareError {
    /// No storage parameters could be resolved from the page or the
    /// public-config endpoint.
    #[error("Photo sharing is not configured for this page.")]
    ConfigMissing,

    /// The storage client could not be constructed, or a previous attempt
    /// already failed this page load.
    #[error("Photo storage is unavailable. {0}")]
    StorageUnavailable(String),

    /// The browser exposes no camera API at all.
    #[error("Camera API is not available in this browser.")]
    CameraApiMissing,

    /// Every constraint attempt was denied or failed.
    #[error("Cannot access camera. {hint}")]
    CameraUnavailable { hint: &'static str },

    /// Capture was requested before the stream reported its dimensions.
    #[error("Camera is still loading. Try again in a moment.")]
    CameraLoading,

    /// The drawing surface could not be acquired or encoded.
    #[error("Unable to capture image from camera.")]
    CaptureSurface,

    /// Upload was requested with nothing in the frame buffer.
    #[error("No photo found. Capture first.")]
    FrameMissing,

    /// The storage backend rejected the upload.
    #[error("Upload failed. Please try again. ({0})")]
    StorageWrite(String),

    /// The fallback file could not be decoded as an image.
    #[error("Could not read that image. Try a different photo.")]
    Decode,
}

impl ShareError {
    /// Camera failure message, distinguishing insecure-context causes from
    /// plain permission denial.
    pub fn camera_unavailable(secure_context: bool) -> Self {
        let hint = if secure_context {
            "Please check permission settings."
        } else {
            "Use HTTPS or localhost, then allow camera permissions."
        };
        ShareError::CameraUnavailable { hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_hint_depends_on_context_security() {
        let secure = ShareError::camera_unavailable(true).to_string();
        let insecure = ShareError::camera_unavailable(false).to_string();

        assert!(secure.contains("permission settings"));
        assert!(insecure.contains("HTTPS or localhost"));
        assert_ne!(secure, insecure);
    }
}
