use std::sync::Arc;
use std::time::Duration;

use crate::models::CandidateProfile;

/// In-memory cache of candidate profiles
///
/// A feed request reads the same profile every time the user refreshes, so the
/// profile is kept for a short TTL. Entries are dropped early when the data
/// store reports a profile change.
#[derive(Clone)]
pub struct ProfileCache {
    inner: moka::future::Cache<String, Arc<CandidateProfile>>,
}

impl ProfileCache {
    /// Create a new profile cache
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let inner = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner }
    }

    /// Get a cached profile
    pub async fn get(&self, user_id: &str) -> Option<Arc<CandidateProfile>> {
        let hit = self.inner.get(user_id).await;
        if hit.is_some() {
            tracing::trace!("Profile cache hit: {}", user_id);
        } else {
            tracing::trace!("Profile cache miss: {}", user_id);
        }
        hit
    }

    /// Store a profile
    pub async fn insert(&self, user_id: &str, profile: CandidateProfile) -> Arc<CandidateProfile> {
        let profile = Arc::new(profile);
        self.inner.insert(user_id.to_string(), profile.clone()).await;
        profile
    }

    /// Drop a cached profile
    pub async fn invalidate(&self, user_id: &str) {
        self.inner.invalidate(user_id).await;
        tracing::debug!("Invalidated cached profile: {}", user_id);
    }
}
