use dioxus::prelude::*;
use wedding_types::GalleryItem;

/// The photo grid. Each render fully replaces the previous content; there
/// is no incremental update path.
#[component]
pub fn GalleryGrid(items: Vec<GalleryItem>) -> Element {
    rsx! {
        div {
            class: "gallery-grid",
            for item in items {
                img {
                    src: "{item.url}",
                    alt: "{item.caption}",
                    loading: "lazy",
                }
            }
        }
    }
}
