use serde::{Deserialize, Serialize};

use crate::core::error::AppError;

/// Response envelope returned by the blog backend: `{ data, message, error? }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<bool>,
}

impl<T> ApiResponse<T> {
    /// True when the payload carries an embedded error flag
    pub fn is_error(&self) -> bool {
        self.error.unwrap_or(false)
    }

    /// Unwrap a 2xx envelope, treating an embedded error flag as a logical failure.
    pub fn into_result(self, fallback: &str) -> Result<Option<T>, AppError> {
        if self.is_error() {
            return Err(AppError::Remote(
                self.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
            ));
        }

        Ok(self.data)
    }
}

/// A single page of a derived view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed page actually shown, after clamping
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_error_flag_is_logical_failure() {
        let body = r#"{"data": null, "message": "Blog not found", "error": true}"#;
        let response: ApiResponse<serde_json::Value> = serde_json::from_str(body).unwrap();

        let err = response.into_result("approve failed").unwrap_err();
        assert!(matches!(err, AppError::Remote(ref m) if m == "Blog not found"));
    }

    #[test]
    fn test_embedded_error_without_message_uses_fallback() {
        let body = r#"{"error": true}"#;
        let response: ApiResponse<serde_json::Value> = serde_json::from_str(body).unwrap();

        let err = response.into_result("approve failed").unwrap_err();
        assert!(matches!(err, AppError::Remote(ref m) if m == "approve failed"));
    }

    #[test]
    fn test_missing_error_flag_is_success() {
        let body = r#"{"data": [1, 2, 3], "message": "ok"}"#;
        let response: ApiResponse<Vec<i64>> = serde_json::from_str(body).unwrap();

        assert!(!response.is_error());
        assert_eq!(response.into_result("list failed").unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_missing_data_is_empty_success() {
        let body = r#"{"message": "deleted"}"#;
        let response: ApiResponse<Vec<i64>> = serde_json::from_str(body).unwrap();

        assert_eq!(response.into_result("delete failed").unwrap(), None);
    }
}
