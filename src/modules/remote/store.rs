use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::auth::Session;
use crate::features::blogs::dtos::BlogFields;
use crate::features::blogs::models::BlogRecord;
use crate::features::categories::models::{Category, CategoryTag};

/// Opaque REST collaborator holding the system of record for blogs and categories.
///
/// Every call carries the session's bearer credential. Implementations must
/// report both transport failures and 2xx responses flagged as errors.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn list_categories(&self, session: &Session) -> Result<Vec<Category>>;

    async fn create_category(
        &self,
        session: &Session,
        name: &str,
        tag: Option<&CategoryTag>,
        actor_id: i64,
    ) -> Result<Category>;

    async fn update_category(
        &self,
        session: &Session,
        id: i64,
        name: &str,
        active: bool,
        tag: Option<&CategoryTag>,
    ) -> Result<Category>;

    async fn delete_category(&self, session: &Session, id: i64) -> Result<()>;

    async fn list_blogs(&self, session: &Session) -> Result<Vec<BlogRecord>>;

    async fn list_blogs_by_user(&self, session: &Session, user_id: i64) -> Result<Vec<BlogRecord>>;

    async fn create_blog(&self, session: &Session, fields: &BlogFields) -> Result<BlogRecord>;

    async fn update_blog(&self, session: &Session, fields: &BlogFields) -> Result<BlogRecord>;

    async fn delete_blog(&self, session: &Session, id: i64) -> Result<()>;

    async fn approve_blog(&self, session: &Session, id: i64, actor_id: i64) -> Result<()>;

    async fn reject_blog(
        &self,
        session: &Session,
        id: i64,
        actor_id: i64,
        reason: &str,
    ) -> Result<()>;
}
