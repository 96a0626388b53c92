//! Delete with optimistic removal and server reconciliation.
//!
//! The record leaves the cache before the remote delete is issued. After a
//! successful delete the mirrors are refetched with bounded, fixed-delay
//! retries; exhausting them reports an error but keeps the record removed.
//! A failed delete triggers a single resync, and if even that fails the
//! removal is compensated from its snapshot.

use std::sync::Arc;
use std::time::Duration;

use crate::core::config::ConsoleConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::Session;
use crate::features::blogs::cache::CollectionCache;
use crate::features::blogs::models::BlogRecord;
use crate::modules::remote::RemoteStore;
use crate::shared::constants::REFETCH_FAILED_MESSAGE;

/// Bounded retry settings for the post-delete refetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefetchPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl From<&ConsoleConfig> for RefetchPolicy {
    fn from(config: &ConsoleConfig) -> Self {
        Self {
            max_attempts: config.delete_refetch_attempts.max(1),
            delay: config.delete_refetch_delay,
        }
    }
}

impl Default for RefetchPolicy {
    fn default() -> Self {
        Self::from(&ConsoleConfig::default())
    }
}

/// Fresh copies of the mirrors fetched in one attempt
struct Snapshot {
    all: Vec<BlogRecord>,
    personal: Option<Vec<BlogRecord>>,
}

pub struct ReconcileController {
    store: Arc<dyn RemoteStore>,
    policy: RefetchPolicy,
}

impl ReconcileController {
    pub fn new(store: Arc<dyn RemoteStore>, policy: RefetchPolicy) -> Self {
        Self { store, policy }
    }

    /// Delete a blog. No role precondition is checked here; the backend decides.
    pub async fn delete(
        &self,
        session: &Session,
        cache: &mut CollectionCache,
        blog_id: i64,
    ) -> Result<()> {
        let removed = cache.remove(blog_id);
        if removed.is_none() {
            tracing::debug!("Blog {} not cached, deleting remotely only", blog_id);
        }

        if let Err(delete_err) = self.store.delete_blog(session, blog_id).await {
            tracing::error!("Failed to delete blog {}: {}", blog_id, delete_err);

            match self.fetch_snapshot(session, cache.personal_loaded()).await {
                Ok(snapshot) => {
                    apply(cache, snapshot);
                    tracing::info!("Resynced blog lists after failed delete of {}", blog_id);
                }
                Err(resync_err) => {
                    tracing::warn!(
                        "Resync after failed delete of blog {} also failed: {}",
                        blog_id,
                        resync_err
                    );
                    if let Some(entry) = removed {
                        cache.restore(entry);
                    }
                }
            }

            return Err(delete_err);
        }

        tracing::info!("Blog {} deleted by user {}", blog_id, session.user_id());
        self.refetch_with_retry(session, cache).await
    }

    async fn refetch_with_retry(&self, session: &Session, cache: &mut CollectionCache) -> Result<()> {
        let personal = cache.personal_loaded();

        for attempt in 1..=self.policy.max_attempts {
            match self.fetch_snapshot(session, personal).await {
                Ok(snapshot) => {
                    apply(cache, snapshot);
                    if attempt > 1 {
                        tracing::info!("Blog lists refetched on attempt {}", attempt);
                    }
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        "Refetch attempt {}/{} failed: {}",
                        attempt,
                        self.policy.max_attempts,
                        e
                    );
                    if attempt < self.policy.max_attempts {
                        tokio::time::sleep(self.policy.delay).await;
                    }
                }
            }
        }

        tracing::error!(
            "Giving up refetch after {} attempts",
            self.policy.max_attempts
        );
        Err(AppError::RefetchExhausted(REFETCH_FAILED_MESSAGE.to_string()))
    }

    async fn fetch_snapshot(&self, session: &Session, personal: bool) -> Result<Snapshot> {
        let all = self.store.list_blogs(session).await?;
        let personal = if personal {
            Some(
                self.store
                    .list_blogs_by_user(session, session.user_id())
                    .await?,
            )
        } else {
            None
        };

        Ok(Snapshot { all, personal })
    }
}

fn apply(cache: &mut CollectionCache, snapshot: Snapshot) {
    cache.replace_all(snapshot.all);
    if let Some(personal) = snapshot.personal {
        cache.replace_personal(personal);
    }
}
