//! REST client for the storage backend: object upload into a bucket,
//! public URL construction, and the `photos` metadata table.

use chrono::DateTime;
use chrono::Utc;
use wedding_types::NewPhotoRecord;
use wedding_types::PhotoRecord;

/// Connection parameters for the storage backend.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageParams {
    pub url: String,
    pub anon_key: String,
    pub bucket: String,
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage client could not be constructed: {0}")]
    Unavailable(String),
    #[error("storage request failed: {0}")]
    Request(String),
    #[error("storage rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Thin client over the storage REST surface. Cheap to share behind an
/// `Arc`; the inner reqwest client pools connections itself.
#[derive(Debug)]
pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    bucket: String,
}

impl StorageClient {
    pub fn new(params: &StorageParams) -> Result<Self, StorageError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;

        Ok(Self {
            http,
            base_url: params.url.trim_end_matches('/').to_string(),
            anon_key: params.anon_key.clone(),
            bucket: params.bucket.clone(),
        })
    }

    /// Uploads one object into the bucket under `key`.
    pub async fn upload_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("content-type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|err| StorageError::Request(err.to_string()))?;

        Self::accepted(response).await.map(|_| ())
    }

    /// Public, externally fetchable URL for a stored object.
    pub fn object_public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, key
        )
    }

    /// Inserts the metadata row for an uploaded object. `created_at` is
    /// assigned by the database.
    pub async fn insert_photo(&self, record: &NewPhotoRecord) -> Result<(), StorageError> {
        let url = format!("{}/rest/v1/photos", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("prefer", "return=minimal")
            .json(record)
            .send()
            .await
            .map_err(|err| StorageError::Request(err.to_string()))?;

        Self::accepted(response).await.map(|_| ())
    }

    /// Fetches all metadata rows, newest first.
    pub async fn list_photos(&self) -> Result<Vec<PhotoRecord>, StorageError> {
        let url = format!(
            "{}/rest/v1/photos?select=file_name,public_url,uploaded_by,created_at&order=created_at.desc",
            self.base_url
        );

        let response = self
            .http
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .send()
            .await
            .map_err(|err| StorageError::Request(err.to_string()))?;

        Self::accepted(response)
            .await?
            .json::<Vec<PhotoRecord>>()
            .await
            .map_err(|err| StorageError::Request(err.to_string()))
    }

    async fn accepted(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StorageError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

/// Generates a collision-resistant object key from the capture time and a
/// short random suffix.
pub fn object_key(now: DateTime<Utc>) -> String {
    let mut raw = [0u8; 3];
    // The timestamp does the heavy lifting; the suffix only disambiguates
    // same-millisecond uploads.
    let _ = getrandom::getrandom(&mut raw);
    let suffix: String = raw.iter().map(|byte| format!("{byte:02x}")).collect();
    format!("photo-{}-{}.jpg", now.timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> StorageParams {
        StorageParams {
            url: "https://example.supabase.co/".to_string(),
            anon_key: "anon".to_string(),
            bucket: "wedding-photos".to_string(),
        }
    }

    #[test]
    fn object_key_has_timestamped_shape() {
        let now = Utc::now();
        let key = object_key(now);

        let rest = key.strip_prefix("photo-").expect("prefix");
        let rest = rest.strip_suffix(".jpg").expect("extension");
        let (millis, suffix) = rest.split_once('-').expect("separator");

        assert_eq!(millis.parse::<i64>().unwrap(), now.timestamp_millis());
        assert_eq!(suffix.len(), 6);
        assert!(u32::from_str_radix(suffix, 16).is_ok());
    }

    #[test]
    fn object_keys_differ_across_instants() {
        let now = Utc::now();
        let later = now + chrono::Duration::milliseconds(1);
        assert_ne!(object_key(now), object_key(later));
    }

    #[test]
    fn public_url_trims_the_trailing_slash() {
        let client = StorageClient::new(&params()).unwrap();
        assert_eq!(
            client.object_public_url("photo-1-abc123.jpg"),
            "https://example.supabase.co/storage/v1/object/public/wedding-photos/photo-1-abc123.jpg"
        );
    }
}
