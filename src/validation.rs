// Field-level validation rules.
//
// Enforced in the db layer so no write path can skip them, and re-checked
// in the PATCH handler so the common failure produces a structured 400
// instead of bubbling up as a server error.

use std::fmt;

/// Minimum accepted length for `Power.description`.
pub const MIN_DESCRIPTION_LEN: usize = 20;

/// Recognized values for `HeroPower.strength`.
pub const VALID_STRENGTHS: [&str; 3] = ["Strong", "Weak", "Average"];

/// A business-rule violation on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        ValidationError {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// A description must be non-empty and at least 20 characters long.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.is_empty() {
        return Err(ValidationError::new("description", "input required"));
    }
    if description.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::new(
            "description",
            format!("must be at least {} characters long", MIN_DESCRIPTION_LEN),
        ));
    }
    Ok(())
}

/// A strength must be exactly one of the three recognized literals.
pub fn validate_strength(strength: &str) -> Result<(), ValidationError> {
    if VALID_STRENGTHS.contains(&strength) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "strength",
            format!("must be one of: {}", VALID_STRENGTHS.join(", ")),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_valid() {
        assert!(validate_description("gives the wielder super strength").is_ok());
    }

    #[test]
    fn test_description_exactly_twenty_chars() {
        let s = "a".repeat(20);
        assert!(validate_description(&s).is_ok());
    }

    #[test]
    fn test_description_too_short() {
        let err = validate_description("too short").unwrap_err();
        assert_eq!(err.field, "description");
    }

    #[test]
    fn test_description_empty() {
        let err = validate_description("").unwrap_err();
        assert_eq!(err.field, "description");
        assert_eq!(err.message, "input required");
    }

    #[test]
    fn test_strength_all_valid_values() {
        for s in VALID_STRENGTHS {
            assert!(validate_strength(s).is_ok());
        }
    }

    #[test]
    fn test_strength_rejects_unknown() {
        assert!(validate_strength("Mighty").is_err());
        assert!(validate_strength("strong").is_err()); // case-sensitive
        assert!(validate_strength("").is_err());
    }
}
