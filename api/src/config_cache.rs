//! Memoizes the environment-derived public configuration.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use tokio::sync::OnceCell;
use tokio::sync::RwLock;
use wedding_types::PublicConfig;

#[derive(Clone, Debug)]
struct CachedConfig {
    config: PublicConfig,
    last_read: Instant,
}

/// Returns the public configuration, re-reading the environment at most
/// once per `CACHE_DURATION`. Safe under concurrent requests.
pub async fn cached_public_config() -> PublicConfig {
    static CACHE: OnceCell<Arc<RwLock<Option<CachedConfig>>>> = OnceCell::const_new();
    const CACHE_DURATION: Duration = Duration::from_secs(300);

    let cache_lock = CACHE
        .get_or_init(|| async { Arc::new(RwLock::new(None)) })
        .await;

    // Check for a fresh entry with a read lock first.
    let read_lock = cache_lock.read().await;
    if let Some(cache) = &*read_lock {
        if cache.last_read.elapsed() < CACHE_DURATION {
            return cache.config.clone();
        }
    }
    drop(read_lock); // Release the read lock before acquiring a write lock.

    let mut write_lock = cache_lock.write().await;

    // Another request may have refreshed the entry while we waited for the
    // write lock.
    if let Some(cache) = &*write_lock {
        if cache.last_read.elapsed() < CACHE_DURATION {
            return cache.config.clone();
        }
    }

    let config = public_config_from_env();
    *write_lock = Some(CachedConfig {
        config: config.clone(),
        last_read: Instant::now(),
    });

    config
}

fn public_config_from_env() -> PublicConfig {
    PublicConfig::from_parts(
        std::env::var("SUPABASE_URL").ok(),
        std::env::var("SUPABASE_ANON_KEY").ok(),
        std::env::var("SUPABASE_BUCKET").ok(),
    )
}
