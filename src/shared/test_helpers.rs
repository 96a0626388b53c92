//! Fixtures and an in-memory `RemoteStore` for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::core::error::{AppError, Result};
use crate::features::auth::model::Principal;
use crate::features::auth::Session;
use crate::features::blogs::dtos::BlogFields;
use crate::features::blogs::models::{BlogRecord, BlogStatus};
use crate::features::categories::models::{Category, CategoryTag};
use crate::modules::remote::RemoteStore;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
}

pub fn session(user_id: i64, role_id: i64) -> Session {
    Session::new(
        Principal::new(user_id, role_id, Some(format!("user{}@example.com", user_id))),
        "test-token",
    )
}

pub fn category(id: i64, name: &str, tag: Option<&str>) -> Category {
    Category {
        id,
        name: name.to_string(),
        tag: tag.and_then(CategoryTag::parse),
        active: true,
    }
}

pub fn blog(id: i64, user_id: i64, category_id: i64, title: &str) -> BlogRecord {
    blog_with_status(id, user_id, category_id, title, BlogStatus::Pending)
}

pub fn blog_with_status(
    id: i64,
    user_id: i64,
    category_id: i64,
    title: &str,
    status: BlogStatus,
) -> BlogRecord {
    BlogRecord {
        id,
        user_id,
        category_id,
        title: title.to_string(),
        body: format!("Body of {}", title),
        tags: vec![],
        images: vec![],
        status,
        created_at: base_time() + Duration::hours(id),
        category_name: None,
    }
}

#[derive(Default)]
struct MockState {
    categories: Vec<Category>,
    blogs: Vec<BlogRecord>,
    calls: Vec<String>,
    list_failures: VecDeque<String>,
    delete_failure: Option<String>,
    moderation_failure: Option<String>,
}

/// In-memory backend that records every call it receives.
///
/// List failures are consumed one per `list_blogs`/`list_blogs_by_user` call.
#[derive(Default)]
pub struct MockRemoteStore {
    state: Mutex<MockState>,
}

impl MockRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        self.state.lock().unwrap().categories = categories;
        self
    }

    pub fn with_blogs(self, blogs: Vec<BlogRecord>) -> Self {
        self.state.lock().unwrap().blogs = blogs;
        self
    }

    /// Make the delete endpoint answer with an embedded error
    pub fn fail_delete(self, message: &str) -> Self {
        self.state.lock().unwrap().delete_failure = Some(message.to_string());
        self
    }

    /// Make approve and reject answer with an embedded error
    pub fn fail_moderation(self, message: &str) -> Self {
        self.state.lock().unwrap().moderation_failure = Some(message.to_string());
        self
    }

    /// Fail the next `count` list calls with a transport error
    pub fn fail_next_lists(&self, count: usize) {
        let mut state = self.state.lock().unwrap();
        for i in 0..count {
            state
                .list_failures
                .push_back(format!("connection reset ({})", i + 1));
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Count calls to one operation, e.g. `"list_blogs"`
    pub fn call_count(&self, operation: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.split(':').next() == Some(operation))
            .count()
    }

    pub fn blogs(&self) -> Vec<BlogRecord> {
        self.state.lock().unwrap().blogs.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.lock().unwrap().categories.clone()
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn take_list_failure(&self) -> Result<()> {
        match self.state.lock().unwrap().list_failures.pop_front() {
            Some(message) => Err(AppError::Transport(message)),
            None => Ok(()),
        }
    }

    fn moderation_result(&self) -> Result<()> {
        match &self.state.lock().unwrap().moderation_failure {
            Some(message) => Err(AppError::Remote(message.clone())),
            None => Ok(()),
        }
    }

    fn set_status(&self, id: i64, status: BlogStatus) {
        let mut state = self.state.lock().unwrap();
        if let Some(blog) = state.blogs.iter_mut().find(|b| b.id == id) {
            blog.status = status;
        }
    }
}

#[async_trait]
impl RemoteStore for MockRemoteStore {
    async fn list_categories(&self, _session: &Session) -> Result<Vec<Category>> {
        self.record("list_categories".to_string());
        Ok(self.categories())
    }

    async fn create_category(
        &self,
        _session: &Session,
        name: &str,
        tag: Option<&CategoryTag>,
        actor_id: i64,
    ) -> Result<Category> {
        self.record(format!("create_category:{}:{}", name, actor_id));
        let mut state = self.state.lock().unwrap();
        let id = state.categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let category = Category {
            id,
            name: name.to_string(),
            tag: tag.cloned(),
            active: true,
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        _session: &Session,
        id: i64,
        name: &str,
        active: bool,
        tag: Option<&CategoryTag>,
    ) -> Result<Category> {
        self.record(format!("update_category:{}", id));
        let mut state = self.state.lock().unwrap();
        let category = state
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::Remote(format!("Category {} not found", id)))?;
        category.name = name.to_string();
        category.active = active;
        category.tag = tag.cloned();
        Ok(category.clone())
    }

    async fn delete_category(&self, _session: &Session, id: i64) -> Result<()> {
        self.record(format!("delete_category:{}", id));
        self.state.lock().unwrap().categories.retain(|c| c.id != id);
        Ok(())
    }

    async fn list_blogs(&self, _session: &Session) -> Result<Vec<BlogRecord>> {
        self.record("list_blogs".to_string());
        self.take_list_failure()?;
        Ok(self.blogs())
    }

    async fn list_blogs_by_user(&self, _session: &Session, user_id: i64) -> Result<Vec<BlogRecord>> {
        self.record(format!("list_blogs_by_user:{}", user_id));
        self.take_list_failure()?;
        Ok(self
            .blogs()
            .into_iter()
            .filter(|b| b.user_id == user_id)
            .collect())
    }

    async fn create_blog(&self, _session: &Session, fields: &BlogFields) -> Result<BlogRecord> {
        self.record(format!("create_blog:{}", fields.title));
        let mut state = self.state.lock().unwrap();
        let id = state.blogs.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        let category_name = state
            .categories
            .iter()
            .find(|c| c.id == fields.category_id)
            .map(|c| c.name.clone());
        let record = BlogRecord {
            id,
            user_id: fields.user_id,
            category_id: fields.category_id,
            title: fields.title.clone(),
            body: fields.body.clone(),
            tags: fields.tags.clone(),
            images: fields.images.clone(),
            status: BlogStatus::Pending,
            created_at: base_time() + Duration::hours(id),
            category_name,
        };
        state.blogs.insert(0, record.clone());
        Ok(record)
    }

    async fn update_blog(&self, _session: &Session, fields: &BlogFields) -> Result<BlogRecord> {
        let id = fields.id.unwrap_or_default();
        self.record(format!("update_blog:{}", id));
        let mut state = self.state.lock().unwrap();
        let blog = state
            .blogs
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::Remote(format!("Blog {} not found", id)))?;
        blog.category_id = fields.category_id;
        blog.title = fields.title.clone();
        blog.body = fields.body.clone();
        blog.tags = fields.tags.clone();
        blog.images = fields.images.clone();
        if let Some(status) = fields.status {
            blog.status = status;
        }
        Ok(blog.clone())
    }

    async fn delete_blog(&self, _session: &Session, id: i64) -> Result<()> {
        self.record(format!("delete_blog:{}", id));
        let mut state = self.state.lock().unwrap();
        if let Some(message) = &state.delete_failure {
            return Err(AppError::Remote(message.clone()));
        }
        state.blogs.retain(|b| b.id != id);
        Ok(())
    }

    async fn approve_blog(&self, _session: &Session, id: i64, actor_id: i64) -> Result<()> {
        self.record(format!("approve_blog:{}:{}", id, actor_id));
        self.moderation_result()?;
        self.set_status(id, BlogStatus::Approved);
        Ok(())
    }

    async fn reject_blog(
        &self,
        _session: &Session,
        id: i64,
        actor_id: i64,
        reason: &str,
    ) -> Result<()> {
        self.record(format!("reject_blog:{}:{}:{}", id, actor_id, reason));
        self.moderation_result()?;
        self.set_status(id, BlogStatus::Rejected);
        Ok(())
    }
}
