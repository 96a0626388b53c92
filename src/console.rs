//! Console facade: one session, one cache, one view.
//!
//! Every entry point takes `&mut self`, so a single action patches both blog
//! mirrors before the next one starts.

use std::sync::Arc;

use crate::core::config::ConsoleConfig;
use crate::core::error::Result;
use crate::features::auth::Session;
use crate::features::blogs::cache::{CollectionCache, Mirror};
use crate::features::blogs::dtos::{CreateBlogDto, UpdateBlogDto};
use crate::features::blogs::models::BlogRecord;
use crate::features::blogs::moderation::AutoApprovalPolicy;
use crate::features::blogs::projection::{
    self, SortOption, StatusFilter, StatusSummary, ViewState,
};
use crate::features::blogs::reconcile::RefetchPolicy;
use crate::features::blogs::BlogService;
use crate::features::categories::dtos::{CreateCategoryDto, UpdateCategoryDto};
use crate::features::categories::models::Category;
use crate::features::categories::CategoryService;
use crate::modules::remote::RemoteStore;
use crate::shared::types::Page;

pub struct BlogConsole {
    session: Session,
    cache: CollectionCache,
    view: ViewState,
    blogs: BlogService,
    categories: CategoryService,
}

impl BlogConsole {
    pub fn new(store: Arc<dyn RemoteStore>, session: Session, config: &ConsoleConfig) -> Self {
        Self {
            session,
            cache: CollectionCache::new(),
            view: ViewState::new(config.page_size),
            blogs: BlogService::new(Arc::clone(&store), RefetchPolicy::from(config)),
            categories: CategoryService::new(store),
        }
    }

    pub fn with_auto_approval(mut self, policy: AutoApprovalPolicy) -> Self {
        self.blogs = self.blogs.with_auto_approval(policy);
        self
    }

    /// Fetch categories and both blog mirrors concurrently, then fill the cache
    pub async fn load(&mut self) -> Result<()> {
        let session = &self.session;
        let (categories, all, personal) = futures::try_join!(
            self.categories.fetch(session),
            self.blogs.fetch_all(session),
            self.blogs.fetch_personal(session),
        )?;

        tracing::info!(
            "Console loaded for user {}: {} categories, {} blogs, {} authored",
            session.user_id(),
            categories.len(),
            all.len(),
            personal.len()
        );

        self.cache.replace_categories(categories);
        self.cache.replace_all(all);
        self.cache.replace_personal(personal);
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cache(&self) -> &CollectionCache {
        &self.cache
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    // =========================================================================
    // VIEW
    // =========================================================================

    pub fn set_tab(&mut self, tab: Mirror) {
        self.view.set_tab(tab);
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.view.set_search(search);
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.view.set_status_filter(filter);
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.view.set_sort(sort);
    }

    pub fn set_page(&mut self, page: i64) {
        self.view.set_page(page);
    }

    /// Advance one page, staying on the last page
    pub fn next_page(&mut self) {
        let page = self.current_page();
        if page.has_next() {
            self.view.set_page(page.page as i64 + 1);
        } else {
            self.view.set_page(page.page as i64);
        }
    }

    pub fn previous_page(&mut self) {
        let page = self.current_page();
        self.view.set_page(page.page as i64);
        self.view.previous_page();
    }

    pub fn current_page(&self) -> Page<BlogRecord> {
        projection::project(&self.cache, &self.view)
    }

    /// Pending records of the current view the session may act on
    pub fn pending_approval(&self) -> Vec<BlogRecord> {
        projection::pending_for_role(&self.cache, &self.view, self.session.permission())
    }

    pub fn status_summary(&self) -> StatusSummary {
        projection::status_summary(self.cache.mirror(self.view.query().tab))
    }

    pub fn category_name_for(&self, blog: &BlogRecord) -> String {
        self.cache.category_name_for(blog)
    }

    // =========================================================================
    // BLOGS
    // =========================================================================

    pub async fn approve(&mut self, blog_id: i64) -> Result<()> {
        self.blogs.approve(&self.session, &mut self.cache, blog_id).await
    }

    pub async fn reject(&mut self, blog_id: i64, reason: &str) -> Result<()> {
        self.blogs
            .reject(&self.session, &mut self.cache, blog_id, reason)
            .await
    }

    pub async fn delete(&mut self, blog_id: i64) -> Result<()> {
        self.blogs.delete(&self.session, &mut self.cache, blog_id).await
    }

    pub async fn create_blog(&mut self, dto: CreateBlogDto) -> Result<BlogRecord> {
        self.blogs.create(&self.session, &mut self.cache, dto).await
    }

    pub async fn update_blog(&mut self, dto: UpdateBlogDto) -> Result<BlogRecord> {
        self.blogs.update(&self.session, &mut self.cache, dto).await
    }

    // =========================================================================
    // CATEGORIES
    // =========================================================================

    pub async fn refresh_categories(&mut self) -> Result<Vec<Category>> {
        self.categories.list(&self.session, &mut self.cache).await
    }

    pub async fn create_category(&mut self, dto: CreateCategoryDto) -> Result<Category> {
        self.categories
            .create(&self.session, &mut self.cache, dto)
            .await
    }

    pub async fn update_category(&mut self, id: i64, dto: UpdateCategoryDto) -> Result<Category> {
        self.categories
            .update(&self.session, &mut self.cache, id, dto)
            .await
    }

    pub async fn delete_category(&mut self, id: i64) -> Result<()> {
        self.categories
            .delete(&self.session, &mut self.cache, id)
            .await
    }
}
