//! The captured-frame buffer: drawing into the offscreen canvas and
//! encoding the JPEG payload for upload. At most one frame is ever live;
//! each capture overwrites the previous one.

use base64::Engine;

/// JPEG encoder quality used for every capture.
pub const JPEG_QUALITY: f64 = 0.9;

const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Extracts the raw JPEG bytes from a `canvas.toDataURL("image/jpeg")`
/// result.
pub fn jpeg_bytes_from_data_url(data_url: &str) -> Option<Vec<u8>> {
    let encoded = data_url.strip_prefix(JPEG_DATA_URL_PREFIX)?;
    base64::engine::general_purpose::STANDARD.decode(encoded).ok()
}

#[cfg(target_arch = "wasm32")]
pub use self::wasm32::*;

#[cfg(target_arch = "wasm32")]
mod wasm32 {
    use tokio::sync::oneshot;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::CanvasRenderingContext2d;
    use web_sys::File;
    use web_sys::FileReader;
    use web_sys::HtmlCanvasElement;
    use web_sys::HtmlImageElement;
    use web_sys::HtmlVideoElement;

    use super::jpeg_bytes_from_data_url;
    use super::JPEG_QUALITY;
    use crate::camera::capture_dimensions;
    use crate::error::ShareError;

    /// Draws the current video frame into the canvas at native resolution.
    pub fn capture_video_frame(
        video: &HtmlVideoElement,
        canvas: &HtmlCanvasElement,
    ) -> Result<(), ShareError> {
        let (width, height) = capture_dimensions(video.video_width(), video.video_height())
            .ok_or(ShareError::CameraLoading)?;

        let context = drawing_context(canvas, width, height)?;
        context
            .draw_image_with_html_video_element(video, 0.0, 0.0)
            .map_err(|_| ShareError::CaptureSurface)?;
        Ok(())
    }

    /// Draws a decoded fallback image into the canvas at its native size.
    pub fn draw_image_frame(
        image: &HtmlImageElement,
        canvas: &HtmlCanvasElement,
    ) -> Result<(), ShareError> {
        let (width, height) =
            capture_dimensions(image.natural_width(), image.natural_height())
                .ok_or(ShareError::Decode)?;

        let context = drawing_context(canvas, width, height)?;
        context
            .draw_image_with_html_image_element(image, 0.0, 0.0)
            .map_err(|_| ShareError::CaptureSurface)?;
        Ok(())
    }

    /// The frame as a JPEG data URL, for the preview image.
    pub fn preview_data_url(canvas: &HtmlCanvasElement) -> Result<String, ShareError> {
        if !has_frame(canvas) {
            return Err(ShareError::FrameMissing);
        }
        canvas
            .to_data_url_with_type_and_encoder_options(
                "image/jpeg",
                &JsValue::from_f64(JPEG_QUALITY),
            )
            .map_err(|_| ShareError::CaptureSurface)
    }

    /// The frame as raw JPEG bytes, for the upload pipeline.
    pub fn encode_frame(canvas: &HtmlCanvasElement) -> Result<Vec<u8>, ShareError> {
        let data_url = preview_data_url(canvas)?;
        jpeg_bytes_from_data_url(&data_url).ok_or(ShareError::CaptureSurface)
    }

    pub fn has_frame(canvas: &HtmlCanvasElement) -> bool {
        canvas.width() > 0 && canvas.height() > 0
    }

    /// Dropping the dimensions releases the pixel buffer.
    pub fn clear_frame(canvas: &HtmlCanvasElement) {
        canvas.set_width(0);
        canvas.set_height(0);
    }

    /// Reads a picked file, decodes it as an image and draws it into the
    /// canvas. Decode failures surface as [`ShareError::Decode`].
    pub async fn load_file_into_canvas(
        file: &File,
        canvas: &HtmlCanvasElement,
    ) -> Result<(), ShareError> {
        let data_url = read_file_as_data_url(file).await?;
        let image = decode_image(&data_url).await?;
        draw_image_frame(&image, canvas)
    }

    /// Reads a picked file as raw bytes, for the direct upload path that
    /// bypasses the canvas.
    pub async fn read_file_bytes(file: &File) -> Result<Vec<u8>, ShareError> {
        let (tx, rx) = oneshot::channel();

        let reader = FileReader::new().map_err(|_| ShareError::Decode)?;
        let reader_clone = reader.clone();
        let onload = Closure::once(move |_: web_sys::ProgressEvent| {
            let bytes = reader_clone
                .result()
                .ok()
                .map(|buffer| js_sys::Uint8Array::new(&buffer).to_vec());
            let _ = tx.send(bytes);
        });
        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        reader
            .read_as_array_buffer(file)
            .map_err(|_| ShareError::Decode)?;
        onload.forget();

        match rx.await {
            Ok(Some(bytes)) if !bytes.is_empty() => Ok(bytes),
            _ => Err(ShareError::Decode),
        }
    }

    async fn read_file_as_data_url(file: &File) -> Result<String, ShareError> {
        let (tx, rx) = oneshot::channel();

        let reader = FileReader::new().map_err(|_| ShareError::Decode)?;
        let reader_clone = reader.clone();
        let onload = Closure::once(move |_: web_sys::ProgressEvent| {
            let result = reader_clone
                .result()
                .ok()
                .and_then(|value| value.as_string());
            let _ = tx.send(result);
        });
        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        reader
            .read_as_data_url(file)
            .map_err(|_| ShareError::Decode)?;
        onload.forget();

        match rx.await {
            Ok(Some(data_url)) => Ok(data_url),
            _ => Err(ShareError::Decode),
        }
    }

    /// The `decode()` promise rejects on anything the browser cannot read
    /// as an image, which is the whole of our format validation.
    async fn decode_image(data_url: &str) -> Result<HtmlImageElement, ShareError> {
        let image = HtmlImageElement::new().map_err(|_| ShareError::Decode)?;
        image.set_src(data_url);
        JsFuture::from(image.decode())
            .await
            .map_err(|_| ShareError::Decode)?;
        Ok(image)
    }

    fn drawing_context(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<CanvasRenderingContext2d, ShareError> {
        canvas.set_width(width);
        canvas.set_height(height);
        canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|context| context.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or(ShareError::CaptureSurface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jpeg_bytes_come_from_a_jpeg_data_url_only() {
        // "hello" in base64.
        let bytes = jpeg_bytes_from_data_url("data:image/jpeg;base64,aGVsbG8=");
        assert_eq!(bytes.as_deref(), Some(b"hello".as_slice()));

        assert_eq!(jpeg_bytes_from_data_url("data:image/png;base64,aGVsbG8="), None);
        assert_eq!(jpeg_bytes_from_data_url("data:image/jpeg;base64,@@@"), None);
        assert_eq!(jpeg_bytes_from_data_url("aGVsbG8="), None);
    }
}
