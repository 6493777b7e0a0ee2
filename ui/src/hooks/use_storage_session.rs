use dioxus::prelude::*;

use crate::storage_session::StorageSession;

/// The page-wide storage session. Provided once by the app root so every
/// flow shares the same three-state resource.
pub fn use_storage_session() -> Signal<StorageSession> {
    use_context::<Signal<StorageSession>>()
}
