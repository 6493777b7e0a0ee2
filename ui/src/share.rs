//! Share-link and QR-image URL computation for the gallery.

use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

const QR_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code/";

// Everything except the characters a query component may carry verbatim.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Absolute URL guests should open for the gallery view.
///
/// The configured public site URL wins; without one the page's own origin is
/// shareable as long as it is not localhost. Localhost with no configured
/// base has no reachable URL to offer.
pub fn gallery_share_url(
    public_site_url: Option<&str>,
    origin: Option<&str>,
    hostname: Option<&str>,
) -> Option<String> {
    let base = match public_site_url.filter(|url| !url.is_empty()) {
        Some(configured) => configured.to_string(),
        None => {
            let hostname = hostname?;
            if hostname == "localhost" || hostname == "127.0.0.1" {
                return None;
            }
            origin?.to_string()
        }
    };

    Some(format!("{}/?view=gallery", base.trim_end_matches('/')))
}

/// QR image URL from the external generator service, with the target URL
/// carried in the `data` query parameter.
pub fn qr_image_url(target: &str) -> String {
    format!(
        "{QR_SERVICE}?size=256x256&data={}",
        utf8_percent_encode(target, QUERY_COMPONENT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_site_url_wins_over_the_origin() {
        let url = gallery_share_url(
            Some("https://wedding.example.com/"),
            Some("https://pages.example.net"),
            Some("pages.example.net"),
        );
        assert_eq!(
            url.as_deref(),
            Some("https://wedding.example.com/?view=gallery")
        );
    }

    #[test]
    fn origin_is_used_only_off_localhost() {
        let url = gallery_share_url(None, Some("https://pages.example.net"), Some("pages.example.net"));
        assert_eq!(url.as_deref(), Some("https://pages.example.net/?view=gallery"));

        assert_eq!(
            gallery_share_url(None, Some("http://localhost:8080"), Some("localhost")),
            None
        );
        assert_eq!(
            gallery_share_url(None, Some("http://127.0.0.1:8080"), Some("127.0.0.1")),
            None
        );
    }

    #[test]
    fn localhost_with_a_configured_base_is_still_shareable() {
        let url = gallery_share_url(
            Some("https://wedding.example.com"),
            Some("http://localhost:8080"),
            Some("localhost"),
        );
        assert_eq!(
            url.as_deref(),
            Some("https://wedding.example.com/?view=gallery")
        );
    }

    #[test]
    fn qr_url_percent_encodes_the_target() {
        let url = qr_image_url("https://wedding.example.com/?view=gallery");
        assert!(url.starts_with("https://api.qrserver.com/v1/create-qr-code/?size=256x256&data="));
        assert!(url.ends_with("https%3A%2F%2Fwedding.example.com%2F%3Fview%3Dgallery"));
    }
}
