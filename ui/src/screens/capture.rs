//=============================================================================
// File: src/screens/capture.rs
//=============================================================================

// Conditionally export the correct implementation based on the target
// architecture: the capture flow drives real browser APIs, so the server
// build only renders a placeholder shell.
#[cfg(target_arch = "wasm32")]
pub use self::wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use self::non_wasm32::*;

#[cfg(target_arch = "wasm32")]
mod wasm32 {
    use std::time::Duration;

    use dioxus::prelude::*;
    use web_sys::HtmlCanvasElement;
    use web_sys::HtmlInputElement;
    use web_sys::HtmlVideoElement;
    use web_sys::MediaStream;

    use crate::camera;
    use crate::camera::CameraSession;
    use crate::client_config;
    use crate::client_config::ResolvedConfig;
    use crate::compat;
    use crate::components::pico::Button;
    use crate::components::pico::ButtonType;
    use crate::components::pico::Card;
    use crate::dom;
    use crate::error::ShareError;
    use crate::frame;
    use crate::hooks::use_gallery_feed::use_gallery_feed;
    use crate::hooks::use_storage_session::use_storage_session;
    use crate::upload;
    use crate::Screen;

    const VIDEO_ID: &str = "capture-video";
    const CANVAS_ID: &str = "capture-canvas";
    const FALLBACK_INPUT_ID: &str = "capture-file-input";

    /// The capture view: live preview, capture/flip/upload controls and the
    /// no-camera file fallback.
    #[component]
    pub fn CaptureScreen() -> Element {
        let config = use_context::<ResolvedConfig>();
        let session = use_storage_session();
        let mut feed = use_gallery_feed();
        let mut active_view = use_context::<Signal<Screen>>();

        let mut camera_session = use_signal(CameraSession::new);
        let mut stream = use_signal::<Option<MediaStream>>(|| None);
        let mut status = use_signal(String::new);
        let mut controls_enabled = use_signal(|| false);
        let mut has_frame = use_signal(|| false);
        let mut preview = use_signal::<Option<String>>(|| None);
        let mut uploading = use_signal(|| false);
        let mut guest_name = use_signal(String::new);

        let storage_configured = config.is_storage_configured();

        // Readiness latch: two media events and the immediate readyState
        // check all funnel through here, the session lets the first one win.
        let mut mark_ready = move || {
            if camera_session.write().mark_ready() {
                controls_enabled.set(true);
                status.set(
                    if storage_configured {
                        "Camera ready."
                    } else {
                        "Camera ready. Mock mode is active."
                    }
                    .to_string(),
                );
            }
        };

        let start_camera = move || async move {
            // At most one stream is ever live.
            if let Some(old) = stream.take() {
                camera::stop_stream(&old);
            }
            camera_session.write().begin_request();
            controls_enabled.set(false);

            let facing = camera_session.peek().facing();
            match camera::request_camera_stream(facing).await {
                Ok(new_stream) => {
                    let Some(video) = dom::get_element_by_id::<HtmlVideoElement>(VIDEO_ID) else {
                        camera::stop_stream(&new_stream);
                        return;
                    };
                    camera::attach_and_play(&video, &new_stream).await;
                    stream.set(Some(new_stream));
                    camera_session.write().mark_active();

                    // The metadata may have arrived before the listeners did.
                    if video.ready_state() >= 1 {
                        mark_ready();
                    }
                }
                Err(err) => {
                    camera_session.write().stop();
                    status.set(err.to_string());
                }
            }
        };

        // Start the camera on mount, in parallel with the gallery feed that
        // the app root already kicked off.
        use_effect(move || {
            spawn(start_camera());
        });

        // Release the stream when the guest navigates away.
        use_drop(move || {
            if let Some(old) = stream.take() {
                camera::stop_stream(&old);
            }
            camera_session.write().stop();
        });

        let capture_photo = move |_| {
            let Some(video) = dom::get_element_by_id::<HtmlVideoElement>(VIDEO_ID) else {
                return;
            };
            let Some(canvas) = dom::get_element_by_id::<HtmlCanvasElement>(CANVAS_ID) else {
                return;
            };

            match frame::capture_video_frame(&video, &canvas)
                .and_then(|_| frame::preview_data_url(&canvas))
            {
                Ok(data_url) => {
                    preview.set(Some(data_url));
                    has_frame.set(true);
                    status.set("Photo captured.".to_string());
                }
                Err(err) => status.set(err.to_string()),
            }
        };

        let flip_camera = move |_| {
            camera_session.write().flip();
            status.set("Switching camera...".to_string());
            spawn(start_camera());
        };

        let pick_fallback_file = move |_| {
            spawn(async move {
                let Some(input) = dom::get_element_by_id::<HtmlInputElement>(FALLBACK_INPUT_ID)
                else {
                    return;
                };
                let Some(file) = input.files().and_then(|files| files.get(0)) else {
                    return;
                };
                let Some(canvas) = dom::get_element_by_id::<HtmlCanvasElement>(CANVAS_ID) else {
                    return;
                };

                match frame::load_file_into_canvas(&file, &canvas).await {
                    Ok(()) => match frame::preview_data_url(&canvas) {
                        Ok(data_url) => {
                            preview.set(Some(data_url));
                            has_frame.set(true);
                            status.set("Photo selected. Ready to upload.".to_string());
                        }
                        Err(err) => status.set(err.to_string()),
                    },
                    Err(err) => status.set(err.to_string()),
                }
                input.set_value("");
            });
        };

        let upload_photo = move |_| {
            // Nothing captured means nothing leaves the page.
            if !has_frame() {
                status.set(ShareError::FrameMissing.to_string());
                return;
            }

            spawn(async move {
                uploading.set(true);
                status.set("Uploading photo...".to_string());

                let outcome = async {
                    let canvas = dom::get_element_by_id::<HtmlCanvasElement>(CANVAS_ID)
                        .ok_or(ShareError::FrameMissing)?;
                    let bytes = frame::encode_frame(&canvas)?;
                    let config = client_config::resolve().await;
                    let uploaded_by = upload::uploader_name(&guest_name.peek());
                    upload::upload_photo_bytes(&config, session, bytes, uploaded_by)
                        .await
                        .map(|record| (canvas, record))
                }
                .await;

                match outcome {
                    Ok((canvas, _record)) => {
                        status.set("Uploaded successfully. Opening gallery...".to_string());
                        frame::clear_frame(&canvas);
                        preview.set(None);
                        has_frame.set(false);
                        feed.reload();

                        compat::sleep(Duration::from_millis(500)).await;
                        active_view.set(Screen::Gallery);
                    }
                    // The frame is kept so the guest can retry.
                    Err(err) => status.set(err.to_string()),
                }
                uploading.set(false);
            });
        };

        rsx! {
            Card {
                h2 { "Share a Photo" }

                div {
                    class: "camera-frame",
                    video {
                        id: VIDEO_ID,
                        autoplay: true,
                        playsinline: true,
                        muted: true,
                        onloadedmetadata: move |_| mark_ready(),
                        oncanplay: move |_| mark_ready(),
                    }
                    canvas { id: CANVAS_ID, class: "capture-canvas" }
                }

                if let Some(data_url) = preview() {
                    img {
                        class: "capture-preview",
                        src: "{data_url}",
                        alt: "Captured photo preview",
                    }
                }

                div {
                    class: "capture-controls",
                    Button {
                        disabled: !controls_enabled(),
                        on_click: capture_photo,
                        "Capture"
                    }
                    Button {
                        button_type: ButtonType::Secondary,
                        outline: true,
                        disabled: !controls_enabled(),
                        on_click: flip_camera,
                        "Flip camera"
                    }
                    Button {
                        disabled: !has_frame() || uploading(),
                        on_click: upload_photo,
                        if uploading() { "Uploading..." } else { "Upload" }
                    }
                }

                label {
                    "Your name (shown with your photos)"
                    input {
                        r#type: "text",
                        placeholder: "Guest",
                        oninput: move |evt| guest_name.set(evt.value()),
                    }
                }

                label {
                    "No camera? Pick a photo instead."
                    input {
                        id: FALLBACK_INPUT_ID,
                        r#type: "file",
                        accept: "image/*",
                        onchange: pick_fallback_file,
                    }
                }

                if !status().is_empty() {
                    p { class: "status-line", "{status}" }
                }

                if session.read().has_failed() {
                    Button {
                        button_type: ButtonType::Secondary,
                        outline: true,
                        on_click: move |_| {
                            let mut session = session;
                            session.write().reset();
                            status.set("Storage reconnected. Try uploading again.".to_string());
                        },
                        "Reconnect storage"
                    }
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm32 {
    use dioxus::prelude::*;

    use crate::components::pico::Card;

    /// The capture flow needs a browser; the server render only ships the
    /// shell that hydration replaces.
    #[component]
    pub fn CaptureScreen() -> Element {
        rsx! {
            Card {
                h2 { "Share a Photo" }
                p { "The camera opens once the page is running in your browser." }
            }
        }
    }
}
