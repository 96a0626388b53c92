use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating category names
    /// Letters, digits, spaces and a small set of punctuation; must start with a letter or digit
    /// - Valid: "Diet", "Heart Health", "Vitamins & Minerals", "Kid's Meals (2-5)"
    /// - Invalid: "", " Diet", "Diet!", "<script>", "Diet#1"
    pub static ref CATEGORY_NAME_REGEX: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 \-_&',.()/]*$").unwrap();

    /// Regex for validating free-form category tags
    /// Lowercase words separated by single hyphens
    /// - Valid: "nutrient", "health", "mental-health"
    /// - Invalid: "Health", "-health", "health--care", "health care"
    pub static ref CATEGORY_TAG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Normalize a title or name for case-insensitive uniqueness checks
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}
