use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::features::blogs::models::{BlogStatus, ImageRef};

const MAX_TITLE_LEN: usize = 200;

/// Title must be 1-200 characters once surrounding whitespace is removed
fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.trim().chars().count();
    if len == 0 || len > MAX_TITLE_LEN {
        return Err(ValidationError::new("title")
            .with_message("Title must be 1-200 characters".into()));
    }
    Ok(())
}

fn validate_body(body: &str) -> Result<(), ValidationError> {
    if body.trim().is_empty() {
        return Err(ValidationError::new("body").with_message("Body must not be empty".into()));
    }
    Ok(())
}

/// Request DTO for authoring a blog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogDto {
    pub category_id: i64,

    #[validate(custom(function = "validate_title"))]
    pub title: String,

    #[validate(custom(function = "validate_body"))]
    pub body: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// Request DTO for editing a blog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogDto {
    pub id: i64,

    pub category_id: i64,

    #[validate(custom(function = "validate_title"))]
    pub title: String,

    #[validate(custom(function = "validate_body"))]
    pub body: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// Payload sent to the backend for create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub user_id: i64,
    pub category_id: i64,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub images: Vec<ImageRef>,
    /// Only set when an edit policy grants a status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BlogStatus>,
}

/// Trim tags, drop blanks and case-insensitive duplicates, keep first-seen order
fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty() && seen.insert(t.to_lowercase()))
        .collect()
}

impl BlogFields {
    pub fn for_create(dto: CreateBlogDto, user_id: i64) -> Self {
        Self {
            id: None,
            user_id,
            category_id: dto.category_id,
            title: dto.title.trim().to_string(),
            body: dto.body,
            tags: clean_tags(dto.tags),
            images: dto.images,
            status: None,
        }
    }

    pub fn for_update(dto: UpdateBlogDto, user_id: i64, status: Option<BlogStatus>) -> Self {
        Self {
            id: Some(dto.id),
            user_id,
            category_id: dto.category_id,
            title: dto.title.trim().to_string(),
            body: dto.body,
            tags: clean_tags(dto.tags),
            images: dto.images,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_blog_validation() {
        let dto = CreateBlogDto {
            category_id: 1,
            title: String::new(),
            body: "text".to_string(),
            tags: vec![],
            images: vec![],
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_blank_title_and_body_are_rejected() {
        let dto = CreateBlogDto {
            category_id: 1,
            title: "   ".to_string(),
            body: "text".to_string(),
            tags: vec![],
            images: vec![],
        };
        assert!(dto.validate().is_err());

        let dto = UpdateBlogDto {
            id: 1,
            category_id: 1,
            title: "Keto".to_string(),
            body: " \n\t ".to_string(),
            tags: vec![],
            images: vec![],
        };
        assert!(dto.validate().is_err());

        let dto = CreateBlogDto {
            category_id: 1,
            title: format!("  {}  ", "a".repeat(200)),
            body: "text".to_string(),
            tags: vec![],
            images: vec![],
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_for_create_cleans_tags_and_title() {
        let dto = CreateBlogDto {
            category_id: 1,
            title: "  Keto Basics ".to_string(),
            body: "text".to_string(),
            tags: vec![
                " keto ".to_string(),
                "".to_string(),
                "Keto".to_string(),
                "diet".to_string(),
            ],
            images: vec![],
        };

        let fields = BlogFields::for_create(dto, 9);
        assert_eq!(fields.title, "Keto Basics");
        assert_eq!(fields.tags, vec!["keto", "diet"]);
        assert_eq!(fields.user_id, 9);
        assert!(fields.status.is_none());

        let json = serde_json::to_value(&fields).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("status").is_none());
    }
}
