//! Configuration error types.

use loanmc_core::LoanError;
use thiserror::Error;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration could not be rendered as TOML.
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Validation error.
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("Multiple validation errors: {}", join_errors(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Loan tape row could not be read.
    #[error("Loan tape error at line {line}: {reason}")]
    Tape {
        /// 1-based line in the tape file (header is line 1).
        line: u64,
        /// Description of the problem.
        reason: String,
    },

    /// Portfolio could not be built.
    #[error(transparent)]
    Loan(#[from] LoanError),
}

impl ConfigError {
    /// Creates a tape error.
    #[must_use]
    pub fn tape(line: u64, reason: impl Into<String>) -> Self {
        Self::Tape {
            line,
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err.to_string())
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(ConfigError::Validation {
                    field: err.field,
                    message: err.message,
                })
            }
            _ => Err(ConfigError::MultipleValidationErrors(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<ValidationError>);

    impl Validate for Fixed {
        fn validate(&self) -> Vec<ValidationError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("simulation.simulations", "must be positive");
        assert_eq!(err.to_string(), "simulation.simulations: must be positive");

        let err = ValidationError::with_rule("report.histogram_bins", "must be positive", "min_bins");
        assert!(err.to_string().ends_with("(rule: min_bins)"));
    }

    #[test]
    fn test_validate_or_error() {
        assert!(Fixed(vec![]).validate_or_error().is_ok());

        let single = Fixed(vec![ValidationError::new("a", "bad")]).validate_or_error();
        assert!(matches!(single, Err(ConfigError::Validation { ref field, .. }) if field == "a"));

        let multi = Fixed(vec![
            ValidationError::new("a", "bad"),
            ValidationError::new("b", "worse"),
        ])
        .validate_or_error()
        .unwrap_err();
        assert_eq!(multi.to_string(), "Multiple validation errors: a: bad; b: worse");
    }

    #[test]
    fn test_tape_error_display() {
        let err = ConfigError::tape(3, "missing field `count`");
        assert_eq!(
            err.to_string(),
            "Loan tape error at line 3: missing field `count`"
        );
    }
}
