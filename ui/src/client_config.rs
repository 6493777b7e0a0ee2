//! Resolves the page configuration: inline build-time values first, then a
//! single cached fetch of the public-config endpoint for anything missing.

use api::storage::StorageParams;
use tokio::sync::OnceCell;
use wedding_types::PublicConfig;
use wedding_types::DEFAULT_BUCKET;

use crate::error::ShareError;

/// Values baked into the served bundle at build time, the analog of the
/// original page's inline globals.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlineConfig {
    pub storage_url: Option<String>,
    pub storage_key: Option<String>,
    pub bucket: Option<String>,
    pub public_site_url: Option<String>,
}

impl InlineConfig {
    fn from_build_env() -> Self {
        Self {
            storage_url: option_env!("SUPABASE_URL").map(str::to_string),
            storage_key: option_env!("SUPABASE_ANON_KEY").map(str::to_string),
            bucket: option_env!("SUPABASE_BUCKET").map(str::to_string),
            public_site_url: option_env!("PUBLIC_SITE_URL").map(str::to_string),
        }
    }

    /// The endpoint is only worth consulting while the storage pair is
    /// incomplete; the bucket has a default.
    fn storage_complete(&self) -> bool {
        fn present(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|value| !value.is_empty())
        }
        present(&self.storage_url) && present(&self.storage_key)
    }
}

/// The page configuration after resolution. Resolution itself never fails;
/// missing storage parameters only surface when a caller asks for them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedConfig {
    pub storage_url: Option<String>,
    pub storage_key: Option<String>,
    pub bucket: String,
    pub public_site_url: Option<String>,
}

impl ResolvedConfig {
    /// Storage connection parameters, or a descriptive error at the point a
    /// caller actually needs storage.
    pub fn storage_params(&self) -> Result<StorageParams, ShareError> {
        match (self.storage_url.as_deref(), self.storage_key.as_deref()) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => Ok(StorageParams {
                url: url.to_string(),
                anon_key: key.to_string(),
                bucket: self.bucket.clone(),
            }),
            _ => Err(ShareError::ConfigMissing),
        }
    }

    pub fn is_storage_configured(&self) -> bool {
        self.storage_params().is_ok()
    }
}

/// Merge rule: inline values always win, the remote config only fills gaps,
/// and the bucket falls back to the default name.
fn merge(inline: InlineConfig, remote: Option<PublicConfig>) -> ResolvedConfig {
    fn non_empty(value: Option<String>) -> Option<String> {
        value.filter(|value| !value.is_empty())
    }

    let remote = remote.unwrap_or_default();

    ResolvedConfig {
        storage_url: non_empty(inline.storage_url).or_else(|| non_empty(Some(remote.supabase_url))),
        storage_key: non_empty(inline.storage_key)
            .or_else(|| non_empty(Some(remote.supabase_anon_key))),
        bucket: non_empty(inline.bucket)
            .or_else(|| non_empty(Some(remote.supabase_bucket)))
            .unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
        public_site_url: non_empty(inline.public_site_url),
    }
}

/// Resolves the configuration once per page load. The endpoint is consulted
/// at most once, and only when the inline values leave the storage pair
/// incomplete; the result is cached for the process lifetime.
pub async fn resolve() -> ResolvedConfig {
    static RESOLVED: OnceCell<ResolvedConfig> = OnceCell::const_new();

    RESOLVED
        .get_or_init(|| async {
            let inline = InlineConfig::from_build_env();
            if inline.storage_complete() {
                return merge(inline, None);
            }

            let remote = match api::public_config().await {
                Ok(config) => Some(config),
                Err(err) => {
                    dioxus_logger::tracing::warn!("public config fetch failed: {err}");
                    None
                }
            };

            merge(inline, remote)
        })
        .await
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(url: Option<&str>, key: Option<&str>, bucket: Option<&str>) -> InlineConfig {
        InlineConfig {
            storage_url: url.map(str::to_string),
            storage_key: key.map(str::to_string),
            bucket: bucket.map(str::to_string),
            public_site_url: None,
        }
    }

    fn remote(url: &str, key: &str, bucket: &str) -> PublicConfig {
        PublicConfig {
            supabase_url: url.to_string(),
            supabase_anon_key: key.to_string(),
            supabase_bucket: bucket.to_string(),
        }
    }

    #[test]
    fn inline_values_are_never_overwritten_by_remote_ones() {
        let resolved = merge(
            inline(Some("https://inline"), Some("inline-key"), Some("inline-bucket")),
            Some(remote("https://remote", "remote-key", "remote-bucket")),
        );

        assert_eq!(resolved.storage_url.as_deref(), Some("https://inline"));
        assert_eq!(resolved.storage_key.as_deref(), Some("inline-key"));
        assert_eq!(resolved.bucket, "inline-bucket");
    }

    #[test]
    fn remote_values_fill_the_gaps_only() {
        let resolved = merge(
            inline(Some("https://inline"), None, None),
            Some(remote("https://remote", "remote-key", "remote-bucket")),
        );

        assert_eq!(resolved.storage_url.as_deref(), Some("https://inline"));
        assert_eq!(resolved.storage_key.as_deref(), Some("remote-key"));
        assert_eq!(resolved.bucket, "remote-bucket");
    }

    #[test]
    fn bucket_defaults_when_unset_everywhere() {
        let resolved = merge(inline(None, None, None), None);
        assert_eq!(resolved.bucket, DEFAULT_BUCKET);

        let resolved = merge(inline(None, None, None), Some(remote("", "", "")));
        assert_eq!(resolved.bucket, DEFAULT_BUCKET);
    }

    #[test]
    fn storage_params_fail_only_on_an_incomplete_pair() {
        let resolved = merge(
            inline(Some("https://inline"), Some("inline-key"), None),
            None,
        );
        let params = resolved.storage_params().unwrap();
        assert_eq!(params.url, "https://inline");
        assert_eq!(params.bucket, DEFAULT_BUCKET);

        let resolved = merge(inline(Some("https://inline"), None, None), None);
        assert_eq!(resolved.storage_params(), Err(ShareError::ConfigMissing));

        let resolved = merge(inline(Some(""), Some(""), None), None);
        assert_eq!(resolved.storage_params(), Err(ShareError::ConfigMissing));
    }
}
