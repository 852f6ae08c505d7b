//! User-friendly error messages

use super::classifiers::classify;
use super::types::{BootstrapError, ErrorCategory};

/// User-facing rendering of a [`BootstrapError`]
#[derive(Debug, Clone)]
pub struct UserFriendlyError {
    /// The error category
    pub category: ErrorCategory,
    /// Short summary
    pub title: String,
    /// Technical message from the underlying error
    pub message: String,
    /// Suggested actions to resolve the error
    pub suggestions: Vec<String>,
    /// Technical error code
    pub error_code: String,
}

impl UserFriendlyError {
    /// Format the error for display
    pub fn format_display(&self) -> String {
        let mut output = format!(
            "{}: {}\n\n{}",
            self.category.display_name(),
            self.title,
            self.message
        );

        if !self.suggestions.is_empty() {
            output.push_str("\n\nSuggested actions:");
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("\n  {}. {}", i + 1, suggestion));
            }
        }

        output
    }
}

impl From<&BootstrapError> for UserFriendlyError {
    fn from(error: &BootstrapError) -> Self {
        let (title, suggestions) = classify(error);
        Self {
            category: error.category(),
            title,
            message: error.to_string(),
            suggestions,
            error_code: error.error_code().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ObjectKind;

    #[test]
    fn test_duplicate_user_suggests_if_absent() {
        let err = BootstrapError::duplicate(ObjectKind::User, "banquito_user", "User already exists");
        let friendly = UserFriendlyError::from(&err);

        assert_eq!(friendly.category, ErrorCategory::Duplicate);
        assert_eq!(friendly.error_code, "BANQUITO_DUPLICATE");
        assert!(friendly.suggestions.iter().any(|s| s.contains("--if-absent")));

        let display = friendly.format_display();
        assert!(display.starts_with("Object Already Exists: user already exists"));
        assert!(display.contains("Suggested actions:"));
    }

    #[test]
    fn test_authentication_title() {
        let err = BootstrapError::Permission {
            message: "bad auth".into(),
            code: Some(18),
        };
        let friendly = UserFriendlyError::from(&err);
        assert_eq!(friendly.title, "Authentication failed");
    }
}
