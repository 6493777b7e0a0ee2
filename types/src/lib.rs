//! Shared wire types for the wedding photo-share app.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Bucket used when neither the page nor the environment names one.
pub const DEFAULT_BUCKET: &str = "wedding-photos";

/// One row of the `photos` metadata table. Immutable once written; the app
/// never deletes photos.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub file_name: String,
    pub public_url: String,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for the metadata table. `created_at` is filled in by the
/// database.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewPhotoRecord {
    pub file_name: String,
    pub public_url: String,
    pub uploaded_by: String,
}

/// Non-secret configuration served by the public-config endpoint. The serde
/// renames are the wire contract consumed by the page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicConfig {
    #[serde(rename = "SUPABASE_URL")]
    pub supabase_url: String,
    #[serde(rename = "SUPABASE_ANON_KEY")]
    pub supabase_anon_key: String,
    #[serde(rename = "SUPABASE_BUCKET")]
    pub supabase_bucket: String,
}

impl PublicConfig {
    /// Builds the endpoint payload from optional environment values. Never
    /// fails: url and key degrade to empty strings, the bucket to
    /// [`DEFAULT_BUCKET`].
    pub fn from_parts(
        url: Option<String>,
        anon_key: Option<String>,
        bucket: Option<String>,
    ) -> Self {
        Self {
            supabase_url: url.unwrap_or_default(),
            supabase_anon_key: anon_key.unwrap_or_default(),
            supabase_bucket: bucket
                .filter(|bucket| !bucket.is_empty())
                .unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
        }
    }
}

/// One renderable gallery entry.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryItem {
    pub url: String,
    pub caption: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_defaults_when_unset_or_empty() {
        let config = PublicConfig::from_parts(None, None, None);
        assert_eq!(config.supabase_bucket, DEFAULT_BUCKET);

        let config = PublicConfig::from_parts(None, None, Some(String::new()));
        assert_eq!(config.supabase_bucket, DEFAULT_BUCKET);

        let config = PublicConfig::from_parts(None, None, Some("our-photos".to_string()));
        assert_eq!(config.supabase_bucket, "our-photos");
    }

    #[test]
    fn missing_url_and_key_become_empty_strings() {
        let config = PublicConfig::from_parts(None, None, None);
        assert_eq!(config.supabase_url, "");
        assert_eq!(config.supabase_anon_key, "");
    }

    #[test]
    fn public_config_uses_the_wire_field_names() {
        let json = serde_json::to_value(PublicConfig::from_parts(
            Some("https://example.supabase.co".to_string()),
            Some("anon".to_string()),
            None,
        ))
        .unwrap();

        assert!(json.get("SUPABASE_URL").is_some());
        assert!(json.get("SUPABASE_ANON_KEY").is_some());
        assert!(json.get("SUPABASE_BUCKET").is_some());
    }
}
