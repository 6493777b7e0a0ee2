//! This crate contains the shared fullstack server functions and the
//! storage REST client used by the browser side.

pub mod storage;

#[cfg(not(target_arch = "wasm32"))]
mod config_cache;

use dioxus::prelude::*;
use wedding_types::PublicConfig;

pub type ApiError = anyhow::Error;

/// Returns the non-secret storage configuration for the page.
///
/// Always answers 200: missing environment values degrade to empty strings
/// and the default bucket name. The response is marked cacheable for five
/// minutes, and the server memoizes the environment read on the same clock.
#[get("/api/public_config")]
pub async fn public_config() -> Result<PublicConfig, ApiError> {
    let config = config_cache::cached_public_config().await;

    if let Some(context) = dioxus::fullstack::FullstackContext::current() {
        context.add_response_header(
            http::header::CACHE_CONTROL,
            http::HeaderValue::from_static("public, max-age=300"),
        );
    }

    Ok(config)
}
