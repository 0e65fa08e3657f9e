use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

/// One finished job retained for later browsing.
#[derive(Debug, Clone)]
struct Session {
    refactored_dir: PathBuf,
    created_at: Instant,
}

/// Keyed store associating opaque session ids with job destination roots.
///
/// Entries expire after a fixed TTL: lookups drop expired entries lazily and
/// [`SessionStore::purge_expired`] sweeps the rest (the server runs it
/// periodically). In a distributed deployment this would be an external
/// keyed store; here one process owns all destination trees.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Registers a destination root and returns its opaque session id.
    pub async fn put(&self, refactored_dir: PathBuf) -> String {
        let session_id = Uuid::new_v4().simple().to_string();
        self.inner.write().await.insert(
            session_id.clone(),
            Session {
                refactored_dir,
                created_at: Instant::now(),
            },
        );
        session_id
    }

    /// Looks up a live session's destination root. Expired entries are
    /// removed and reported as absent.
    pub async fn get(&self, session_id: &str) -> Option<PathBuf> {
        {
            let guard = self.inner.read().await;
            let session = guard.get(session_id)?;
            if session.created_at.elapsed() <= self.ttl {
                return Some(session.refactored_dir.clone());
            }
        }
        self.inner.write().await.remove(session_id);
        None
    }

    /// Drops every expired session and deletes its destination tree.
    /// Returns how many sessions were evicted.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let expired: Vec<String> = guard
            .iter()
            .filter(|(_, session)| session.created_at.elapsed() > self.ttl)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            if let Some(session) = guard.remove(key) {
                if let Err(err) = std::fs::remove_dir_all(&session.refactored_dir) {
                    log::debug!(
                        "could not remove expired session dir {}: {err}",
                        session.refactored_dir.display()
                    );
                }
            }
        }
        expired.len()
    }
}
