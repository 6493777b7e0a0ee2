use dioxus::prelude::*;
use wedding_types::GalleryItem;
use wedding_types::PhotoRecord;

use crate::client_config::ResolvedConfig;
use crate::storage_session::StorageSession;

/// The gallery feed: a shared resource holding the items of the last
/// successful load. `None` while the first load is still in flight.
#[derive(Clone, Copy)]
pub struct GalleryFeed {
    items: Resource<Vec<GalleryItem>>,
}

impl GalleryFeed {
    pub fn items(&self) -> Option<Vec<GalleryItem>> {
        self.items.read().clone()
    }

    /// Replaces the feed with a fresh load; used after every upload.
    pub fn reload(&mut self) {
        self.items.restart();
    }
}

/// Starts the feed loading at app mount, in parallel with the camera, and
/// shares it through the context.
pub fn provide_gallery_feed(
    config: ResolvedConfig,
    session: Signal<StorageSession>,
) -> GalleryFeed {
    let items = use_resource(move || {
        let config = config.clone();
        async move { load_items(config, session).await }
    });

    use_context_provider(|| GalleryFeed { items })
}

pub fn use_gallery_feed() -> GalleryFeed {
    use_context::<GalleryFeed>()
}

/// Errors never propagate to the view: an unconfigured page gets the mock
/// set, anything else degrades to an empty gallery.
async fn load_items(config: ResolvedConfig, mut session: Signal<StorageSession>) -> Vec<GalleryItem> {
    let params = match config.storage_params() {
        Ok(params) => params,
        Err(_) => return mock_gallery(),
    };

    let client = match session.write().client(&params) {
        Ok(client) => client,
        Err(err) => {
            dioxus_logger::tracing::warn!("gallery load skipped: {err}");
            return Vec::new();
        }
    };

    match client.list_photos().await {
        Ok(records) => gallery_items_from_records(records),
        Err(err) => {
            dioxus_logger::tracing::warn!("gallery load failed: {err}");
            Vec::new()
        }
    }
}

/// Maps metadata rows to renderable items, newest first regardless of what
/// order the backend answered in.
pub fn gallery_items_from_records(mut records: Vec<PhotoRecord>) -> Vec<GalleryItem> {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    records
        .into_iter()
        .map(|record| GalleryItem {
            caption: if record.uploaded_by.is_empty() {
                "Wedding photo".to_string()
            } else {
                format!("Shared by {}", record.uploaded_by)
            },
            url: record.public_url,
        })
        .collect()
}

/// Sample photos shown while the page runs without storage configuration.
pub fn mock_gallery() -> Vec<GalleryItem> {
    [
        (
            "https://images.unsplash.com/photo-1511285560929-80b456fea0bc?auto=format&fit=crop&w=1200&q=80",
            "Bride and groom smiling under flower arch",
        ),
        (
            "https://images.unsplash.com/photo-1520854221256-17451cc331bf?auto=format&fit=crop&w=1200&q=80",
            "Wedding rings and bouquet",
        ),
        (
            "https://images.unsplash.com/photo-1522673607200-164d1b6ce486?auto=format&fit=crop&w=1200&q=80",
            "Guests celebrating at reception",
        ),
    ]
    .into_iter()
    .map(|(url, caption)| GalleryItem {
        url: url.to_string(),
        caption: caption.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    fn record(name: &str, seconds: i64, uploaded_by: &str) -> PhotoRecord {
        PhotoRecord {
            file_name: name.to_string(),
            public_url: format!("https://example.supabase.co/{name}"),
            uploaded_by: uploaded_by.to_string(),
            created_at: Utc.timestamp_opt(seconds, 0).unwrap(),
        }
    }

    #[test]
    fn newest_photo_renders_first() {
        let a = record("a.jpg", 100, "Ada");
        let b = record("b.jpg", 200, "Ben");

        let items = gallery_items_from_records(vec![a.clone(), b.clone()]);
        assert_eq!(items[0].url, b.public_url);
        assert_eq!(items[1].url, a.public_url);

        // The backend already answering newest-first changes nothing.
        let items = gallery_items_from_records(vec![b.clone(), a.clone()]);
        assert_eq!(items[0].url, b.public_url);
    }

    #[test]
    fn captions_name_the_uploader_when_known() {
        let items = gallery_items_from_records(vec![record("a.jpg", 1, "Ada"), record("b.jpg", 2, "")]);
        assert_eq!(items[0].caption, "Wedding photo");
        assert_eq!(items[1].caption, "Shared by Ada");
    }

    #[test]
    fn mock_gallery_is_a_non_empty_sample() {
        assert_eq!(mock_gallery().len(), 3);
    }
}
