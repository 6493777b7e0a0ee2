// The client-side Dioxus application logic.

use dioxus::prelude::*;

pub mod camera;
pub mod client_config;
pub mod compat;
mod components;
pub mod dom;
pub mod error;
pub mod frame;
pub mod hooks;
mod screens;
pub mod share;
pub mod storage_session;
pub mod upload;

use client_config::ResolvedConfig;
use components::pico::Container;
use screens::capture::CaptureScreen;
use screens::gallery::GalleryScreen;
use storage_session::StorageSession;

/// Enum to represent the different views of the app.
#[derive(Clone, Copy, PartialEq, Default)]
pub(crate) enum Screen {
    #[default]
    Capture,
    Gallery,
}

impl Screen {
    /// Helper to get the display name for each view.
    fn name(&self) -> &'static str {
        match self {
            Screen::Capture => "Share a Photo",
            Screen::Gallery => "Gallery",
        }
    }
}

/// A list of all views for easy iteration.
const ALL_SCREENS: [Screen; 2] = [Screen::Capture, Screen::Gallery];

/// The navigation tabs component.
#[component]
fn Tabs(active_screen: Signal<Screen>) -> Element {
    rsx! {
        nav {
            class: "tab-menu",
            ul {
                for screen in ALL_SCREENS {
                    li {
                        a {
                            href: "#",
                            class: if active_screen() == screen { "active-tab" } else { "" },
                            "aria-current": if active_screen() == screen { "page" } else { "false" },
                            onclick: move |event| {
                                event.prevent_default();
                                active_screen.set(screen);
                            },
                            "{screen.name()}"
                        }
                    }
                }
            }
        }
    }
}

//=============================================================================
// MAIN APPLICATION COMPONENT (Client-side)
//=============================================================================

#[allow(non_snake_case)]
pub fn App() -> Element {
    let app_css = r#"
    .tab-menu a.active-tab {
        color: var(--pico-primary);
        font-weight: bold;
        border-bottom: 3px solid var(--pico-primary);
        text-decoration: none;
    }

    .tab-menu a:not(.active-tab) {
        color: var(--pico-muted-color);
        border-bottom: 3px solid transparent;
    }

    .camera-frame video {
        width: 100%;
        max-height: 420px;
        border-radius: var(--pico-border-radius);
        background: #000;
    }

    /* The frame buffer itself never shows; the preview image does. */
    .capture-canvas {
        display: none;
    }

    .capture-preview {
        width: 100%;
        margin-top: 0.75rem;
        border-radius: var(--pico-border-radius);
    }

    .capture-controls {
        display: flex;
        gap: 0.75rem;
        flex-wrap: wrap;
        margin: 1rem 0;
    }

    .status-line {
        color: var(--pico-muted-color);
        margin-top: 0.5rem;
    }

    .photo-count {
        color: var(--pico-muted-color);
    }

    .gallery-grid {
        display: grid;
        grid-template-columns: repeat(auto-fill, minmax(180px, 1fr));
        gap: 0.75rem;
    }

    .gallery-grid img {
        width: 100%;
        aspect-ratio: 1 / 1;
        object-fit: cover;
        border-radius: var(--pico-border-radius);
    }
"#;

    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1.0",
        }
        document::Stylesheet {
            href: "https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css",
        }
        style {
            "{app_css}"
        }
        AppBody {}
    }
}

#[component]
fn AppBody() -> Element {
    // Resolution is cheap when the inline values are complete; otherwise it
    // performs this page load's one public-config fetch.
    let config_future = use_resource(|| async { client_config::resolve().await });

    let config_ref = config_future.read();
    match &*config_ref {
        Some(config) => rsx! {
            LoadedApp {
                config: config.clone(),
            }
        },
        None => rsx! {
            p {
                "Loading..."
            }
        },
    }
}

/// Holds the page-wide state once the configuration is resolved.
#[component]
fn LoadedApp(config: ResolvedConfig) -> Element {
    use_context_provider(|| config.clone());

    // One storage session per page load, shared by every upload and the
    // gallery loader.
    let session = use_context_provider(|| Signal::new(StorageSession::new()));

    // The gallery feed starts loading right away, in parallel with the
    // camera that the capture view brings up.
    hooks::use_gallery_feed::provide_gallery_feed(config, session);

    // The shared QR link lands guests directly on the gallery view.
    let active_screen = use_context_provider(|| {
        Signal::new(if dom::initial_view_is_gallery() {
            Screen::Gallery
        } else {
            Screen::Capture
        })
    });

    rsx! {
        Container {
            header {
                hgroup {
                    h1 { "Anna & Mark" }
                    p { "March 20, 2026 · Manila, Philippines" }
                }
                Tabs {
                    active_screen,
                }
            }
            div {
                class: "content",
                match active_screen() {
                    Screen::Capture => rsx! {
                        CaptureScreen {}
                    },
                    Screen::Gallery => rsx! {
                        GalleryScreen {}
                    },
                }
            }
        }
    }
}
