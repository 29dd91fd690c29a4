//! # Validation Errors

use thiserror::Error;

/// Result type for model validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// One or more field rules failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .messages.join(", "))]
pub struct ValidationError {
    pub messages: Vec<String>,
}

/// Collects rule violations for a single document
#[derive(Debug, Default)]
pub(crate) struct Violations {
    messages: Vec<String>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, ok: bool, message: impl Into<String>) {
        if !ok {
            self.messages.push(message.into());
        }
    }

    pub fn into_result(self) -> ValidationResult<()> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                messages: self.messages,
            })
        }
    }
}

/// Trim, mapping whitespace-only strings to `None`
pub(crate) fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_joined() {
        let mut v = Violations::new();
        v.check(false, "Please add a name");
        v.check(true, "unused");
        v.check(false, "Please add a description");

        let err = v.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Please add a name, Please add a description");
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(trimmed(Some("  x ".into())), Some("x".to_string()));
        assert_eq!(trimmed(Some("   ".into())), None);
        assert_eq!(trimmed(None), None);
    }
}
