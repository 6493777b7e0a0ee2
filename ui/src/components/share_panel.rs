use dioxus::prelude::*;

use crate::client_config::ResolvedConfig;
use crate::dom;
use crate::share;

/// QR code and link for handing the gallery to other guests. The QR image
/// itself comes from an external generator service; when no shareable URL
/// can be computed, instructional text replaces the broken image.
#[component]
pub fn SharePanel() -> Element {
    let config = use_context::<ResolvedConfig>();

    let share_url = share::gallery_share_url(
        config.public_site_url.as_deref(),
        dom::page_origin().as_deref(),
        dom::page_hostname().as_deref(),
    );

    rsx! {
        div {
            style: "margin-top: 1.5rem; text-align: center;",
            h4 { "Invite other guests" }
            match share_url {
                Some(url) => rsx! {
                    figure {
                        style: "margin: 0;",
                        img {
                            src: share::qr_image_url(&url),
                            alt: "QR code linking to the wedding gallery",
                            width: "256",
                            height: "256",
                        }
                        figcaption {
                            style: "font-size: 14px; margin-top: 8px; word-break: break-all;",
                            a { href: "{url}", "{url}" }
                        }
                    }
                },
                None => rsx! {
                    p {
                        "Set a public site URL to share the gallery from this device."
                    }
                },
            }
        }
    }
}
