pub mod use_gallery_feed;
pub mod use_storage_session;
