use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Moderation status of a blog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    #[serde(alias = "Pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "Approved", alias = "APPROVED")]
    Approved,
    #[serde(alias = "Rejected", alias = "REJECTED")]
    Rejected,
}

impl BlogStatus {
    /// Parse a status name, ignoring case and surrounding whitespace
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "pending" => Some(BlogStatus::Pending),
            "approved" => Some(BlogStatus::Approved),
            "rejected" => Some(BlogStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for BlogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlogStatus::Pending => write!(f, "pending"),
            BlogStatus::Approved => write!(f, "approved"),
            BlogStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Uploaded image attached to a blog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub url: String,
    #[serde(alias = "filename")]
    pub file_name: String,
}

/// Blog record as returned by the blog backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRecord {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub title: String,
    #[serde(alias = "content")]
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    pub status: BlogStatus,
    pub created_at: DateTime<Utc>,
    /// Denormalized at fetch time; may be stale
    #[serde(default)]
    pub category_name: Option<String>,
}
