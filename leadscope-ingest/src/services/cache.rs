//! TTL cache for single-item categorization results
//!
//! Keyed by a digest of (client name, transcript) so identical re-uploads
//! skip the remote call without keeping full transcripts as map keys.

use crate::models::CategorizationResult;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Default entry lifetime (matches the re-categorization cadence of the UI)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Bounded-lifetime key-value cache of categorization results
pub struct CategorizationCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, CategorizationResult)>>,
}

impl CategorizationCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn cache_key(transcript: &str, client_name: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(client_name.as_bytes());
        hasher.update([0u8]);
        hasher.update(transcript.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Look up a fresh entry, evicting it if the TTL has lapsed
    pub async fn get(&self, transcript: &str, client_name: &str) -> Option<CategorizationResult> {
        let key = Self::cache_key(transcript, client_name);
        let mut entries = self.entries.lock().await;

        match entries.get(&key) {
            Some((inserted, result)) if inserted.elapsed() < self.ttl => Some(result.clone()),
            Some(_) => {
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    pub async fn insert(&self, transcript: &str, client_name: &str, result: CategorizationResult) {
        let key = Self::cache_key(transcript, client_name);
        self.entries
            .lock()
            .await
            .insert(key, (Instant::now(), result));
    }

    /// Drop every entry (forces re-categorization)
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

impl Default for CategorizationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
