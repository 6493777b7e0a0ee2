//! The page's storage-client resource.
//!
//! Replaces the original lazy "attempt once, fail forever" singleton with an
//! explicit three-state resource owned by the page: `Uninitialized`,
//! `Ready`, or `Failed`. A failed session keeps failing fast; the only
//! transition out of `Failed` is an explicit [`StorageSession::reset`].

use std::sync::Arc;

use api::storage::StorageClient;
use api::storage::StorageParams;

use crate::error::ShareError;

#[derive(Clone, Debug, Default)]
enum SessionState {
    #[default]
    Uninitialized,
    Ready(Arc<StorageClient>),
    Failed(String),
}

#[derive(Clone, Debug, Default)]
pub struct StorageSession {
    state: SessionState,
}

impl StorageSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the storage client, constructing it on first use. A failed
    /// construction is remembered: later calls fail immediately without
    /// retrying until `reset` is called.
    pub fn client(&mut self, params: &StorageParams) -> Result<Arc<StorageClient>, ShareError> {
        match &self.state {
            SessionState::Ready(client) => Ok(client.clone()),
            SessionState::Failed(reason) => Err(ShareError::StorageUnavailable(reason.clone())),
            SessionState::Uninitialized => match StorageClient::new(params) {
                Ok(client) => {
                    let client = Arc::new(client);
                    self.state = SessionState::Ready(client.clone());
                    Ok(client)
                }
                Err(err) => {
                    let reason = err.to_string();
                    self.state = SessionState::Failed(reason.clone());
                    Err(ShareError::StorageUnavailable(reason))
                }
            },
        }
    }

    pub fn has_failed(&self) -> bool {
        matches!(self.state, SessionState::Failed(_))
    }

    /// The single allowed transition out of `Failed`. A no-op from any other
    /// state, so a ready client is never thrown away by accident.
    pub fn reset(&mut self) {
        if let SessionState::Failed(_) = self.state {
            self.state = SessionState::Uninitialized;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> StorageParams {
        StorageParams {
            url: "https://example.supabase.co".to_string(),
            anon_key: "anon".to_string(),
            bucket: "wedding-photos".to_string(),
        }
    }

    fn failed_session() -> StorageSession {
        StorageSession {
            state: SessionState::Failed("boom".to_string()),
        }
    }

    #[test]
    fn first_use_initializes_and_later_uses_share_the_client() {
        let mut session = StorageSession::new();
        let first = session.client(&params()).unwrap();
        let second = session.client(&params()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn failed_session_fails_immediately_without_retrying() {
        let mut session = failed_session();
        let err = session.client(&params()).unwrap_err();
        assert_eq!(err, ShareError::StorageUnavailable("boom".to_string()));
        assert!(session.has_failed());
    }

    #[test]
    fn reset_leaves_failed_only() {
        let mut session = failed_session();
        session.reset();
        assert!(!session.has_failed());
        // After the reset a fresh initialization attempt is allowed again.
        assert!(session.client(&params()).is_ok());

        // Reset never discards a ready client.
        let before = session.client(&params()).unwrap();
        session.reset();
        let after = session.client(&params()).unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }
}
