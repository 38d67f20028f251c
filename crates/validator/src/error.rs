//! Error types
//!
//! Three kinds of failure are kept strictly apart:
//!
//! - [`ValidationError`]: a rule that did not hold for a record. These are
//!   expected and data-driven; they are collected in a
//!   [`ValidationReport`](crate::ValidationReport) and never returned as `Err`
//!   from evaluation.
//! - [`ConfigError`]: a validator that was put together wrongly (no field
//!   path, empty rule key, unreadable config). These surface from the
//!   `build()` call that finalizes a builder.
//! - [`EvaluationError`]: a record that could not be evaluated completely,
//!   such as a null value reaching a required nested validator. Evaluation
//!   stops and no report is produced.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// One violated rule: where it happened and which rule it was.
///
/// `key` is a symbolic rule key such as `"is_not_null"` or a caller supplied
/// key for predicate rules. No human-readable message is attached; turning
/// keys into text is up to the caller.
///
/// # Examples
///
/// ```rust
/// use bean_validator::ValidationError;
///
/// let error = ValidationError::new("address.zip", "is_not_empty");
/// assert_eq!(error.path(), "address.zip");
/// assert_eq!(error.key(), "is_not_empty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationError {
    path: String,
    key: Cow<'static, str>,
}

impl ValidationError {
    /// Creates an error for `path` violating the rule `key`.
    pub fn new(path: impl Into<String>, key: impl Into<Cow<'static, str>>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Qualified path of the offending field.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Symbolic key of the violated rule.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Re-homes the error under a composed path.
    pub(crate) fn rehome(&mut self, path: String) {
        self.path = path;
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.path, self.key)
    }
}

// ============================================================================
// CONFIGURATION ERROR
// ============================================================================

/// A validator could not be finalized.
///
/// Returned from [`FieldValidatorBuilder::build`](crate::FieldValidatorBuilder::build),
/// [`RecordValidatorBuilder::build`](crate::RecordValidatorBuilder::build) and
/// [`ValidatorConfig::from_json`](crate::ValidatorConfig::from_json).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// No explicit field path was given and no naming strategy produced one.
    #[error("no field path for accessor `{accessor}`: name the field or attach a naming strategy")]
    UnresolvedFieldPath {
        /// Type name of the accessor that could not be named.
        accessor: String,
    },

    /// The field path resolved to an empty string.
    #[error("field path for accessor `{accessor}` is empty")]
    EmptyFieldPath {
        /// Type name of the accessor.
        accessor: String,
    },

    /// A rule was registered with an empty key.
    #[error("rule on field `{field}` has an empty key")]
    EmptyRuleKey {
        /// Path of the field the rule belongs to.
        field: String,
    },

    /// A serialized [`ValidatorConfig`](crate::ValidatorConfig) could not be read.
    #[error("invalid validator config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

// ============================================================================
// EVALUATION ERROR
// ============================================================================

/// Evaluation of a record could not complete.
///
/// Returned from [`RecordValidator::validate_all`](crate::RecordValidator::validate_all)
/// and [`FieldValidator::validate`](crate::FieldValidator::validate). A report
/// is only produced when every rule and every nested validator ran.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum EvaluationError {
    /// A required nested validator was attached to a field whose value is null.
    #[error("field `{path}` is null but has a nested validator")]
    NullNestedValue {
        /// Fully qualified path of the null field.
        path: String,
    },
}

impl EvaluationError {
    /// Qualified path of the field the evaluation stopped at.
    pub fn path(&self) -> &str {
        match self {
            Self::NullNestedValue { path } => path,
        }
    }

    /// Re-homes the error below `prefix`, joined with `separator`.
    pub(crate) fn under(self, prefix: &str, separator: &str) -> Self {
        match self {
            Self::NullNestedValue { path } => Self::NullNestedValue {
                path: format!("{prefix}{separator}{path}"),
            },
        }
    }
}
