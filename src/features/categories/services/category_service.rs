use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::Session;
use crate::features::blogs::cache::CollectionCache;
use crate::features::categories::dtos::{CreateCategoryDto, UpdateCategoryDto};
use crate::features::categories::models::Category;
use crate::modules::remote::RemoteStore;

/// Service for category operations
pub struct CategoryService {
    store: Arc<dyn RemoteStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    pub async fn fetch(&self, session: &Session) -> Result<Vec<Category>> {
        self.store.list_categories(session).await.inspect_err(|e| {
            tracing::error!("Failed to list categories: {}", e);
        })
    }

    /// List all categories and refresh the cached collection
    pub async fn list(&self, session: &Session, cache: &mut CollectionCache) -> Result<Vec<Category>> {
        let categories = self.fetch(session).await?;
        cache.replace_categories(categories.clone());
        Ok(categories)
    }

    pub async fn create(
        &self,
        session: &Session,
        cache: &mut CollectionCache,
        dto: CreateCategoryDto,
    ) -> Result<Category> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let name = dto.name.trim();
        if cache.category_name_taken(name, None) {
            return Err(AppError::Validation(format!(
                "Category '{}' already exists",
                name
            )));
        }

        let tag = dto.parsed_tag();
        let category = self
            .store
            .create_category(session, name, tag.as_ref(), session.user_id())
            .await
            .inspect_err(|e| tracing::error!("Failed to create category '{}': {}", name, e))?;

        tracing::info!(
            "Category {} '{}' created by user {}",
            category.id,
            category.name,
            session.user_id()
        );

        cache.upsert_categories(vec![category.clone()]);
        Ok(category)
    }

    pub async fn update(
        &self,
        session: &Session,
        cache: &mut CollectionCache,
        id: i64,
        dto: UpdateCategoryDto,
    ) -> Result<Category> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if cache.category(id).is_none() {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }

        let name = dto.name.trim();
        if cache.category_name_taken(name, Some(id)) {
            return Err(AppError::Validation(format!(
                "Category '{}' already exists",
                name
            )));
        }

        let tag = dto.parsed_tag();
        let category = self
            .store
            .update_category(session, id, name, dto.active, tag.as_ref())
            .await
            .inspect_err(|e| tracing::error!("Failed to update category {}: {}", id, e))?;

        tracing::info!("Category {} updated by user {}", id, session.user_id());

        cache.upsert_categories(vec![category.clone()]);
        Ok(category)
    }

    /// Delete a category. Blogs referencing it are kept and show as uncategorized.
    pub async fn delete(
        &self,
        session: &Session,
        cache: &mut CollectionCache,
        id: i64,
    ) -> Result<()> {
        self.store
            .delete_category(session, id)
            .await
            .inspect_err(|e| tracing::error!("Failed to delete category {}: {}", id, e))?;

        cache.remove_category(id);
        tracing::info!("Category {} deleted by user {}", id, session.user_id());

        Ok(())
    }
}
