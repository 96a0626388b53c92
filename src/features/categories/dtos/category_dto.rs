use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::features::categories::models::CategoryTag;
use crate::shared::validation::{CATEGORY_NAME_REGEX, CATEGORY_TAG_REGEX};

const MAX_NAME_LEN: usize = 100;

/// Names are checked after trimming, which is how they are stored
fn validate_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(ValidationError::new("name")
            .with_message("Name must be 1-100 characters".into()));
    }
    if !CATEGORY_NAME_REGEX.is_match(name) {
        return Err(ValidationError::new("name").with_message(
            "Name may only contain letters, digits, spaces and - _ & ' , . ( ) /".into(),
        ));
    }
    Ok(())
}

fn validate_tag(tag: &str) -> Result<(), ValidationError> {
    match CategoryTag::parse(tag) {
        None => Ok(()),
        Some(parsed) if CATEGORY_TAG_REGEX.is_match(parsed.as_str()) => Ok(()),
        Some(_) => Err(ValidationError::new("tag")
            .with_message("Tag must be lowercase words separated by hyphens".into())),
    }
}

/// Request DTO for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryDto {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    #[validate(custom(function = "validate_tag"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Request DTO for updating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryDto {
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    pub active: bool,

    #[validate(custom(function = "validate_tag"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl CreateCategoryDto {
    pub fn parsed_tag(&self) -> Option<CategoryTag> {
        self.tag.as_deref().and_then(CategoryTag::parse)
    }
}

impl UpdateCategoryDto {
    pub fn parsed_tag(&self) -> Option<CategoryTag> {
        self.tag.as_deref().and_then(CategoryTag::parse)
    }
}
