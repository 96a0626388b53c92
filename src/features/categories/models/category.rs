use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::constants::{TAG_HEALTH, TAG_NUTRIENT};

/// Sensitivity tag attached to a category.
///
/// Known tags map to their own variants; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum CategoryTag {
    Nutrient,
    Health,
    Other(String),
}

impl CategoryTag {
    /// Parse a raw tag. Blank values and the literal "none" mean no tag.
    pub fn parse(raw: &str) -> Option<Self> {
        let tag = raw.trim().to_lowercase();
        match tag.as_str() {
            "" | "none" | "null" => None,
            TAG_NUTRIENT => Some(CategoryTag::Nutrient),
            TAG_HEALTH => Some(CategoryTag::Health),
            _ => Some(CategoryTag::Other(tag)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryTag::Nutrient => TAG_NUTRIENT,
            CategoryTag::Health => TAG_HEALTH,
            CategoryTag::Other(tag) => tag,
        }
    }
}

impl From<CategoryTag> for String {
    fn from(tag: CategoryTag) -> Self {
        tag.as_str().to_string()
    }
}

impl std::fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn deserialize_tag<'de, D>(deserializer: D) -> Result<Option<CategoryTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(CategoryTag::parse))
}

fn default_active() -> bool {
    true
}

/// Category as returned by the blog backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_tag")]
    pub tag: Option<CategoryTag>,
    #[serde(default = "default_active", alias = "isActive")]
    pub active: bool,
}

impl Category {
    pub fn tag_str(&self) -> Option<&str> {
        self.tag.as_ref().map(CategoryTag::as_str)
    }
}
