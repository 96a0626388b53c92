use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::Session;
use crate::features::blogs::cache::{CollectionCache, Mirror};
use crate::features::blogs::dtos::{BlogFields, CreateBlogDto, UpdateBlogDto};
use crate::features::blogs::models::BlogRecord;
use crate::features::blogs::moderation::{AutoApprovalPolicy, ModerationService};
use crate::features::blogs::reconcile::{ReconcileController, RefetchPolicy};
use crate::modules::remote::RemoteStore;

/// Service for blog authoring and moderation against the local cache
pub struct BlogService {
    store: Arc<dyn RemoteStore>,
    moderation: ModerationService,
    reconciler: ReconcileController,
    auto_approval: AutoApprovalPolicy,
}

impl BlogService {
    pub fn new(store: Arc<dyn RemoteStore>, refetch: RefetchPolicy) -> Self {
        Self {
            moderation: ModerationService::new(Arc::clone(&store)),
            reconciler: ReconcileController::new(Arc::clone(&store), refetch),
            store,
            auto_approval: AutoApprovalPolicy::default(),
        }
    }

    pub fn with_auto_approval(mut self, policy: AutoApprovalPolicy) -> Self {
        self.auto_approval = policy;
        self
    }

    /// Fetch every blog visible to the session
    pub async fn fetch_all(&self, session: &Session) -> Result<Vec<BlogRecord>> {
        self.store.list_blogs(session).await.inspect_err(|e| {
            tracing::error!("Failed to list blogs: {}", e);
        })
    }

    /// Fetch the blogs authored by the session user
    pub async fn fetch_personal(&self, session: &Session) -> Result<Vec<BlogRecord>> {
        self.store
            .list_blogs_by_user(session, session.user_id())
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "Failed to list blogs of user {}: {}",
                    session.user_id(),
                    e
                );
            })
    }

    pub async fn load_all(&self, session: &Session, cache: &mut CollectionCache) -> Result<usize> {
        let records = self.fetch_all(session).await?;
        let count = records.len();
        cache.replace_all(records);
        Ok(count)
    }

    pub async fn load_personal(
        &self,
        session: &Session,
        cache: &mut CollectionCache,
    ) -> Result<usize> {
        let records = self.fetch_personal(session).await?;
        let count = records.len();
        cache.replace_personal(records);
        Ok(count)
    }

    fn ensure_category(cache: &CollectionCache, category_id: i64) -> Result<()> {
        if cache.categories_loaded() && cache.category(category_id).is_none() {
            return Err(AppError::Validation(format!(
                "Category {} does not exist",
                category_id
            )));
        }
        Ok(())
    }

    fn ensure_unique_title(
        cache: &CollectionCache,
        title: &str,
        exclude_id: Option<i64>,
    ) -> Result<()> {
        if cache.title_taken(title, exclude_id) {
            return Err(AppError::Validation(format!(
                "A blog titled '{}' already exists",
                title.trim()
            )));
        }
        Ok(())
    }

    /// Author a new blog. The backend decides its initial status.
    pub async fn create(
        &self,
        session: &Session,
        cache: &mut CollectionCache,
        dto: CreateBlogDto,
    ) -> Result<BlogRecord> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        Self::ensure_category(cache, dto.category_id)?;
        Self::ensure_unique_title(cache, &dto.title, None)?;

        let fields = BlogFields::for_create(dto, session.user_id());
        let record = self
            .store
            .create_blog(session, &fields)
            .await
            .inspect_err(|e| tracing::error!("Failed to create blog: {}", e))?;

        tracing::info!(
            "Blog {} created by user {} ({})",
            record.id,
            session.user_id(),
            record.status
        );

        let personal = session.principal.owns(record.user_id);
        cache.upsert_record(record.clone(), personal);

        Ok(record)
    }

    /// Edit a cached blog, applying the auto-approval policy to the submitted status
    pub async fn update(
        &self,
        session: &Session,
        cache: &mut CollectionCache,
        dto: UpdateBlogDto,
    ) -> Result<BlogRecord> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = cache
            .get(dto.id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Blog {} not found", dto.id)))?;
        Self::ensure_category(cache, dto.category_id)?;
        Self::ensure_unique_title(cache, &dto.title, Some(dto.id))?;

        let status = self
            .auto_approval
            .status_on_edit(&session.principal, &existing);
        if let Some(status) = status {
            tracing::debug!(
                "Edit of blog {} by user {} sets status {}",
                existing.id,
                session.user_id(),
                status
            );
        }

        let fields = BlogFields::for_update(dto, existing.user_id, status);
        let record = self
            .store
            .update_blog(session, &fields)
            .await
            .inspect_err(|e| tracing::error!("Failed to update blog {}: {}", existing.id, e))?;

        tracing::info!("Blog {} updated by user {}", record.id, session.user_id());

        let personal = cache.contains(Mirror::Personal, existing.id);
        cache.upsert_record(record.clone(), personal);

        Ok(record)
    }

    pub async fn approve(
        &self,
        session: &Session,
        cache: &mut CollectionCache,
        blog_id: i64,
    ) -> Result<()> {
        self.moderation.approve(session, cache, blog_id).await
    }

    pub async fn reject(
        &self,
        session: &Session,
        cache: &mut CollectionCache,
        blog_id: i64,
        reason: &str,
    ) -> Result<()> {
        self.moderation.reject(session, cache, blog_id, reason).await
    }

    pub async fn delete(
        &self,
        session: &Session,
        cache: &mut CollectionCache,
        blog_id: i64,
    ) -> Result<()> {
        self.reconciler.delete(session, cache, blog_id).await
    }
}
