use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use uuid::Uuid;

use crate::core::config::ApiConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::Session;
use crate::features::blogs::dtos::BlogFields;
use crate::features::blogs::models::BlogRecord;
use crate::features::categories::models::{Category, CategoryTag};
use crate::modules::remote::RemoteStore;
use crate::shared::types::ApiResponse;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// reqwest-backed client for the blog backend
pub struct HttpRemoteStore {
    base_url: String,
    http_client: Client,
}

impl HttpRemoteStore {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and unwrap the response envelope.
    ///
    /// `action` names the operation for logs and for the generic fallback message.
    async fn send<T: DeserializeOwned>(
        &self,
        session: &Session,
        request: RequestBuilder,
        action: &str,
    ) -> Result<Option<T>> {
        let request_id = Uuid::now_v7().to_string();

        tracing::debug!("Blog API request: {} (request_id={})", action, request_id);

        let response = request
            .bearer_auth(session.token())
            .header(REQUEST_ID_HEADER, &request_id)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Blog API {} failed (request_id={}): {}", action, request_id, e);
                AppError::Transport(format!("Failed to {}: {}", action, e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::error!("Failed to read {} response: {}", action, e);
            AppError::Transport(format!("Failed to read {} response: {}", action, e))
        })?;

        parse_envelope(status, &body, action).inspect_err(|e| {
            tracing::error!(
                "Blog API {} returned error (request_id={}, status={}): {}",
                action,
                request_id,
                status,
                e
            );
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        session: &Session,
        request: RequestBuilder,
        action: &str,
    ) -> Result<T> {
        self.send::<T>(session, request, action)
            .await?
            .ok_or_else(|| AppError::Remote(format!("Failed to {}: response had no data", action)))
    }

    async fn ack(&self, session: &Session, request: RequestBuilder, action: &str) -> Result<()> {
        self.send::<serde_json::Value>(session, request, action)
            .await
            .map(|_| ())
    }
}

/// Interpret a backend response.
///
/// Non-2xx statuses are transport failures; 2xx bodies flagged with
/// `error: true` are logical failures. Server messages win over fallbacks.
pub(crate) fn parse_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    action: &str,
) -> Result<Option<T>> {
    let fallback = format!("Failed to {}", action);

    if !status.is_success() {
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
            .ok()
            .and_then(|envelope| envelope.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("{}: HTTP {}", fallback, status));

        return Err(match status {
            StatusCode::FORBIDDEN => AppError::Forbidden(message),
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            _ => AppError::Transport(message),
        });
    }

    if body.trim().is_empty() {
        return Ok(None);
    }

    let envelope: ApiResponse<T> = serde_json::from_str(body).map_err(|e| {
        AppError::Remote(format!("{}: unexpected response body ({})", fallback, e))
    })?;

    envelope.into_result(&fallback)
}

fn tag_value(tag: Option<&CategoryTag>) -> Option<&str> {
    tag.map(CategoryTag::as_str)
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn list_categories(&self, session: &Session) -> Result<Vec<Category>> {
        let request = self.http_client.get(self.url("/categories"));
        self.fetch(session, request, "list categories").await
    }

    async fn create_category(
        &self,
        session: &Session,
        name: &str,
        tag: Option<&CategoryTag>,
        actor_id: i64,
    ) -> Result<Category> {
        let request = self.http_client.post(self.url("/categories")).json(&json!({
            "name": name,
            "tag": tag_value(tag),
            "userId": actor_id,
        }));
        self.fetch(session, request, "create category").await
    }

    async fn update_category(
        &self,
        session: &Session,
        id: i64,
        name: &str,
        active: bool,
        tag: Option<&CategoryTag>,
    ) -> Result<Category> {
        let request = self
            .http_client
            .put(self.url(&format!("/categories/{}", id)))
            .json(&json!({
                "name": name,
                "active": active,
                "tag": tag_value(tag),
            }));
        self.fetch(session, request, "update category").await
    }

    async fn delete_category(&self, session: &Session, id: i64) -> Result<()> {
        let request = self
            .http_client
            .delete(self.url(&format!("/categories/{}", id)));
        self.ack(session, request, "delete category").await
    }

    async fn list_blogs(&self, session: &Session) -> Result<Vec<BlogRecord>> {
        let request = self.http_client.get(self.url("/blogs"));
        self.fetch(session, request, "list blogs").await
    }

    async fn list_blogs_by_user(&self, session: &Session, user_id: i64) -> Result<Vec<BlogRecord>> {
        let request = self
            .http_client
            .get(self.url(&format!("/blogs/user/{}", user_id)));
        self.fetch(session, request, "list user blogs").await
    }

    async fn create_blog(&self, session: &Session, fields: &BlogFields) -> Result<BlogRecord> {
        let request = self.http_client.post(self.url("/blogs")).json(fields);
        self.fetch(session, request, "create blog").await
    }

    async fn update_blog(&self, session: &Session, fields: &BlogFields) -> Result<BlogRecord> {
        let id = fields
            .id
            .ok_or_else(|| AppError::Validation("Blog id is required for update".to_string()))?;
        let request = self
            .http_client
            .put(self.url(&format!("/blogs/{}", id)))
            .json(fields);
        self.fetch(session, request, "update blog").await
    }

    async fn delete_blog(&self, session: &Session, id: i64) -> Result<()> {
        let request = self.http_client.delete(self.url(&format!("/blogs/{}", id)));
        self.ack(session, request, "delete blog").await
    }

    async fn approve_blog(&self, session: &Session, id: i64, actor_id: i64) -> Result<()> {
        let request = self
            .http_client
            .put(self.url(&format!("/blogs/{}/approve", id)))
            .json(&json!({ "userId": actor_id }));
        self.ack(session, request, "approve blog").await
    }

    async fn reject_blog(
        &self,
        session: &Session,
        id: i64,
        actor_id: i64,
        reason: &str,
    ) -> Result<()> {
        let request = self
            .http_client
            .put(self.url(&format!("/blogs/{}/reject", id)))
            .json(&json!({ "userId": actor_id, "reason": reason }));
        self.ack(session, request, "reject blog").await
    }
}
