//=============================================================================
// File: src/screens/gallery.rs
//=============================================================================

use dioxus::prelude::*;

use crate::components::empty_state::EmptyState;
use crate::components::gallery_grid::GalleryGrid;
use crate::components::pico::Card;
use crate::components::share_panel::SharePanel;
use crate::hooks::use_gallery_feed::use_gallery_feed;

/// The gallery view: live count, photo grid, a camera-free upload input and
/// the share tools.
#[component]
pub fn GalleryScreen() -> Element {
    let feed = use_gallery_feed();

    rsx! {
        Card {
            h2 { "Wedding Gallery" }

            match feed.items() {
                Some(items) => rsx! {
                    p {
                        class: "photo-count",
                        "{photo_count_label(items.len())}"
                    }
                    if items.is_empty() {
                        EmptyState {
                            title: "No photos yet",
                            description: "Captured photos will appear here for everyone.",
                            icon: rsx! { span { "📷" } },
                        }
                    } else {
                        GalleryGrid { items }
                    }
                },
                None => rsx! {
                    p { "Loading gallery..." }
                },
            }

            GalleryUpload {}
            SharePanel {}
        }
    }
}

fn photo_count_label(count: usize) -> String {
    format!("{} photo{}", count, if count == 1 { "" } else { "s" })
}

#[cfg(target_arch = "wasm32")]
use self::wasm32::GalleryUpload;

#[cfg(not(target_arch = "wasm32"))]
use self::non_wasm32::GalleryUpload;

#[cfg(target_arch = "wasm32")]
mod wasm32 {
    use dioxus::prelude::*;
    use web_sys::HtmlInputElement;

    use crate::client_config;
    use crate::dom;
    use crate::frame;
    use crate::hooks::use_gallery_feed::use_gallery_feed;
    use crate::hooks::use_storage_session::use_storage_session;
    use crate::upload;

    const GALLERY_INPUT_ID: &str = "gallery-file-input";

    /// Direct upload into the gallery, for guests who already have a photo.
    #[component]
    pub fn GalleryUpload() -> Element {
        let session = use_storage_session();
        let mut feed = use_gallery_feed();
        let mut status = use_signal(String::new);
        let mut uploading = use_signal(|| false);

        let pick_file = move |_| {
            spawn(async move {
                let Some(input) = dom::get_element_by_id::<HtmlInputElement>(GALLERY_INPUT_ID)
                else {
                    return;
                };
                let Some(file) = input.files().and_then(|files| files.get(0)) else {
                    return;
                };

                uploading.set(true);
                status.set("Uploading photo...".to_string());

                let outcome = async {
                    let bytes = frame::read_file_bytes(&file).await?;
                    let config = client_config::resolve().await;
                    upload::upload_photo_bytes(
                        &config,
                        session,
                        bytes,
                        upload::DEFAULT_GUEST_NAME.to_string(),
                    )
                    .await
                }
                .await;

                match outcome {
                    Ok(_) => {
                        status.set("Photo uploaded to gallery.".to_string());
                        feed.reload();
                    }
                    Err(err) => {
                        dioxus_logger::tracing::warn!("gallery upload failed: {err}");
                        status.set("Upload failed. Please try another photo.".to_string());
                    }
                }
                uploading.set(false);
                input.set_value("");
            });
        };

        rsx! {
            label {
                style: "margin-top: 1.5rem;",
                "Add a photo from your device"
                input {
                    id: GALLERY_INPUT_ID,
                    r#type: "file",
                    accept: "image/*",
                    disabled: uploading(),
                    onchange: pick_file,
                }
            }
            if !status().is_empty() {
                p { class: "status-line", "{status}" }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm32 {
    use dioxus::prelude::*;

    #[component]
    pub fn GalleryUpload() -> Element {
        rsx! {
            label {
                style: "margin-top: 1.5rem;",
                "Add a photo from your device"
                input { r#type: "file", accept: "image/*", disabled: true }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_count_pluralizes() {
        assert_eq!(photo_count_label(0), "0 photos");
        assert_eq!(photo_count_label(1), "1 photo");
        assert_eq!(photo_count_label(2), "2 photos");
    }
}
