//! Moderation state machine for blog records.
//!
//! Status lifecycle: a new blog starts `pending`; moderators move it to
//! `approved` or `rejected`. Decided blogs may be moderated again. Every
//! transition is authorized locally (role + category tag) before the remote
//! mutation is issued, and the cache is only patched after the remote call
//! succeeds. Approve and reject are never retried.

use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{Principal, RoleId};
use crate::features::auth::Session;
use crate::features::blogs::cache::CollectionCache;
use crate::features::blogs::models::{BlogRecord, BlogStatus};
use crate::modules::remote::RemoteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationAction {
    Approve,
    Reject,
}

impl ModerationAction {
    /// Status a record ends up in after this action
    pub fn target_status(self) -> BlogStatus {
        match self {
            ModerationAction::Approve => BlogStatus::Approved,
            ModerationAction::Reject => BlogStatus::Rejected,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            ModerationAction::Approve => "approve",
            ModerationAction::Reject => "reject",
        }
    }
}

impl std::fmt::Display for ModerationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.verb())
    }
}

/// Status granted when a blog is edited.
///
/// `ExpertOwnerEdits` approves edits made by health experts and nutrient
/// specialists to their own blogs; every other edit keeps the server's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoApprovalPolicy {
    #[default]
    ExpertOwnerEdits,
    Disabled,
}

impl AutoApprovalPolicy {
    pub fn status_on_edit(&self, editor: &Principal, record: &BlogRecord) -> Option<BlogStatus> {
        match self {
            AutoApprovalPolicy::Disabled => None,
            AutoApprovalPolicy::ExpertOwnerEdits => {
                let expert = matches!(
                    editor.role,
                    RoleId::HealthExpert | RoleId::NutrientSpecialist
                );
                (expert && editor.owns(record.user_id)).then_some(BlogStatus::Approved)
            }
        }
    }
}

/// Check that the session may apply `action` to the blog. Issues no remote calls.
pub fn authorize(
    session: &Session,
    cache: &CollectionCache,
    blog_id: i64,
    action: ModerationAction,
) -> Result<()> {
    let record = cache
        .get(blog_id)
        .ok_or_else(|| AppError::NotFound(format!("Blog {} not found", blog_id)))?;

    let permission = session.permission();
    let allowed = match action {
        ModerationAction::Approve => permission.can_approve,
        ModerationAction::Reject => permission.can_reject,
    };
    if !allowed {
        return Err(AppError::Forbidden(format!(
            "Your role is not allowed to {} blogs",
            action
        )));
    }

    if permission.restricted_tags.is_empty() {
        return Ok(());
    }

    // A role with tag restrictions needs the category to know its tag
    let category = cache.category(record.category_id).ok_or_else(|| {
        AppError::Forbidden(format!(
            "Cannot {} blog {}: category {} is unknown, refresh categories first",
            action, blog_id, record.category_id
        ))
    })?;
    if let Some(restricted) = category.tag_str().and_then(|t| permission.restriction_for(t)) {
        return Err(AppError::Forbidden(format!(
            "Your role cannot {} blogs in '{}' tagged categories",
            action, restricted
        )));
    }

    Ok(())
}

/// Runs approve/reject transitions against the remote store
pub struct ModerationService {
    store: Arc<dyn RemoteStore>,
}

impl ModerationService {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    pub async fn approve(
        &self,
        session: &Session,
        cache: &mut CollectionCache,
        blog_id: i64,
    ) -> Result<()> {
        self.transition(session, cache, blog_id, ModerationAction::Approve, None)
            .await
    }

    /// Reject a blog. The reason is forwarded to the backend and not kept locally.
    pub async fn reject(
        &self,
        session: &Session,
        cache: &mut CollectionCache,
        blog_id: i64,
        reason: &str,
    ) -> Result<()> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::Validation(
                "A rejection reason is required".to_string(),
            ));
        }

        self.transition(
            session,
            cache,
            blog_id,
            ModerationAction::Reject,
            Some(reason),
        )
        .await
    }

    async fn transition(
        &self,
        session: &Session,
        cache: &mut CollectionCache,
        blog_id: i64,
        action: ModerationAction,
        reason: Option<&str>,
    ) -> Result<()> {
        if let Err(e) = authorize(session, cache, blog_id, action) {
            tracing::warn!(
                "Blocked {} of blog {} by user {}: {}",
                action,
                blog_id,
                session.user_id(),
                e
            );
            return Err(e);
        }

        if let Some(current) = cache.get(blog_id).map(|r| r.status) {
            if current != BlogStatus::Pending {
                tracing::debug!(
                    "Blog {} is already {}, applying {} again",
                    blog_id,
                    current,
                    action
                );
            }
        }

        let actor_id = session.user_id();
        let outcome = match action {
            ModerationAction::Approve => self.store.approve_blog(session, blog_id, actor_id).await,
            ModerationAction::Reject => {
                self.store
                    .reject_blog(session, blog_id, actor_id, reason.unwrap_or_default())
                    .await
            }
        };
        outcome.inspect_err(|e| tracing::error!("Failed to {} blog {}: {}", action, blog_id, e))?;

        cache.patch_status(blog_id, action.target_status());
        tracing::info!("Blog {} {}d by user {}", blog_id, action, actor_id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::shared::test_helpers::{blog, category, session, MockRemoteStore};

    fn seeded_cache() -> CollectionCache {
        let mut cache = CollectionCache::new();
        cache.replace_categories(vec![
            category(1, "Diet", Some("nutrient")),
            category(2, "Heart", Some("health")),
            category(3, "General", None),
        ]);
        cache.replace_all(vec![
            blog(10, 7, 1, "Keto Basics"),
            blog(11, 8, 2, "Blood Pressure"),
            blog(12, 8, 3, "Sleep Well"),
        ]);
        cache.replace_personal(vec![blog(10, 7, 1, "Keto Basics")]);
        cache
    }

    #[tokio::test]
    async fn test_nutrient_specialist_cannot_approve_nutrient_blog() {
        let store = Arc::new(MockRemoteStore::new());
        let service = ModerationService::new(store.clone());
        let mut cache = seeded_cache();
        let session = session(7, 4);

        let err = service.approve(&session, &mut cache, 10).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert!(err.to_string().contains("nutrient"));
        assert_eq!(cache.get(10).unwrap().status, BlogStatus::Pending);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_restricted_tags_block_both_actions_for_every_role() {
        let cases = [(3, 2), (4, 1)];
        for (role, blog_category) in cases {
            let store = Arc::new(MockRemoteStore::new());
            let service = ModerationService::new(store.clone());
            let mut cache = seeded_cache();
            let blog_id = if blog_category == 1 { 10 } else { 11 };
            let session = session(99, role);

            let approve = service.approve(&session, &mut cache, blog_id).await;
            let reject = service
                .reject(&session, &mut cache, blog_id, "off topic")
                .await;

            assert!(matches!(approve, Err(AppError::Forbidden(_))));
            assert!(matches!(reject, Err(AppError::Forbidden(_))));
            assert!(store.calls().is_empty(), "role {} hit the store", role);
        }
    }

    #[tokio::test]
    async fn test_unknown_category_blocks_restricted_roles_only() {
        let mut cache = CollectionCache::new();
        cache.replace_all(vec![blog(10, 7, 1, "Keto Basics")]);

        for role in [3, 4] {
            let store = Arc::new(MockRemoteStore::new());
            let service = ModerationService::new(store.clone());

            let err = service
                .approve(&session(50, role), &mut cache, 10)
                .await
                .unwrap_err();

            assert_eq!(err.kind(), ErrorKind::Authorization);
            assert!(store.calls().is_empty());
        }
        assert_eq!(cache.get(10).unwrap().status, BlogStatus::Pending);

        let store = Arc::new(MockRemoteStore::new());
        ModerationService::new(store.clone())
            .approve(&session(50, 5), &mut cache, 10)
            .await
            .unwrap();
        assert_eq!(store.calls(), vec!["approve_blog:10:50"]);
    }

    #[tokio::test]
    async fn test_category_known_after_refresh_is_checked() {
        let store = Arc::new(MockRemoteStore::new());
        let service = ModerationService::new(store.clone());
        let mut cache = CollectionCache::new();
        cache.replace_all(vec![blog(10, 7, 1, "Keto Basics"), blog(11, 8, 4, "Omega 3")]);
        cache.replace_categories(vec![category(1, "Diet", Some("nutrient"))]);

        let err = service
            .approve(&session(50, 4), &mut cache, 11)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);

        cache.upsert_categories(vec![category(4, "Supplements", Some("nutrient"))]);
        let err = service
            .approve(&session(50, 4), &mut cache, 11)
            .await
            .unwrap_err();
        assert!(err.user_message().contains("nutrient"));

        cache.upsert_categories(vec![category(4, "Supplements", None)]);
        service
            .approve(&session(50, 4), &mut cache, 11)
            .await
            .unwrap();
        assert_eq!(cache.get(11).unwrap().status, BlogStatus::Approved);
    }

    #[tokio::test]
    async fn test_non_moderator_is_forbidden() {
        let store = Arc::new(MockRemoteStore::new());
        let service = ModerationService::new(store.clone());
        let mut cache = seeded_cache();

        let err = service
            .approve(&session(1, 1), &mut cache, 12)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_approve_patches_both_mirrors() {
        let store = Arc::new(MockRemoteStore::new());
        let service = ModerationService::new(store.clone());
        let mut cache = seeded_cache();

        service
            .approve(&session(50, 5), &mut cache, 10)
            .await
            .unwrap();

        assert_eq!(cache.all()[0].status, BlogStatus::Approved);
        assert_eq!(cache.personal()[0].status, BlogStatus::Approved);
        assert_eq!(store.calls(), vec!["approve_blog:10:50"]);
    }

    #[tokio::test]
    async fn test_reject_requires_reason() {
        let store = Arc::new(MockRemoteStore::new());
        let service = ModerationService::new(store.clone());
        let mut cache = seeded_cache();

        let err = service
            .reject(&session(50, 5), &mut cache, 12, "   ")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_reject_updates_record_only_in_all_mirror() {
        let store = Arc::new(MockRemoteStore::new());
        let service = ModerationService::new(store.clone());
        let mut cache = seeded_cache();

        service
            .reject(&session(50, 3), &mut cache, 12, "  needs sources ")
            .await
            .unwrap();

        assert_eq!(cache.get(12).unwrap().status, BlogStatus::Rejected);
        assert_eq!(cache.personal().len(), 1);
        assert_eq!(store.calls(), vec!["reject_blog:12:50:needs sources"]);
    }

    #[tokio::test]
    async fn test_remote_logical_error_leaves_status() {
        let store = Arc::new(MockRemoteStore::new().fail_moderation("Blog is locked"));
        let service = ModerationService::new(store.clone());
        let mut cache = seeded_cache();

        let err = service
            .approve(&session(50, 5), &mut cache, 12)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Logical);
        assert_eq!(err.user_message(), "Blog is locked");
        assert_eq!(cache.get(12).unwrap().status, BlogStatus::Pending);
        assert_eq!(store.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_decided_blog_can_be_moderated_again() {
        let store = Arc::new(MockRemoteStore::new());
        let service = ModerationService::new(store.clone());
        let mut cache = seeded_cache();
        let clinic = session(50, 5);

        service.approve(&clinic, &mut cache, 12).await.unwrap();
        service
            .reject(&clinic, &mut cache, 12, "outdated")
            .await
            .unwrap();

        assert_eq!(cache.get(12).unwrap().status, BlogStatus::Rejected);
    }

    #[tokio::test]
    async fn test_unknown_blog_is_not_found() {
        let store = Arc::new(MockRemoteStore::new());
        let service = ModerationService::new(store.clone());
        let mut cache = seeded_cache();

        let err = service
            .approve(&session(50, 5), &mut cache, 404)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.calls().is_empty());
    }

    #[test]
    fn test_auto_approval_policy() {
        let record = blog(10, 7, 1, "Keto Basics");
        let policy = AutoApprovalPolicy::default();

        let owner_expert = Principal::new(7, 3, None);
        let owner_specialist = Principal::new(7, 4, None);
        let owner_clinic = Principal::new(7, 5, None);
        let other_expert = Principal::new(8, 3, None);

        assert_eq!(
            policy.status_on_edit(&owner_expert, &record),
            Some(BlogStatus::Approved)
        );
        assert_eq!(
            policy.status_on_edit(&owner_specialist, &record),
            Some(BlogStatus::Approved)
        );
        assert_eq!(policy.status_on_edit(&owner_clinic, &record), None);
        assert_eq!(policy.status_on_edit(&other_expert, &record), None);
        assert_eq!(
            AutoApprovalPolicy::Disabled.status_on_edit(&owner_expert, &record),
            None
        );
    }
}
