//! Record validators
//!
//! A [`RecordValidator`] is the ordered set of field validators for one
//! record type. Evaluating it runs every field and merges their reports.
//! Because a finished record validator can be handed to
//! [`FieldValidatorBuilder::with_record_validator`](crate::FieldValidatorBuilder::with_record_validator),
//! validators compose into arbitrarily deep trees that mirror the record
//! nesting.
//!
//! Rule violations are data and end up in the [`ValidationReport`]. A record
//! that cannot be evaluated completely is an [`EvaluationError`] instead, so a
//! valid report always means every rule ran.

use crate::config::ValidatorConfig;
use crate::error::{ConfigError, EvaluationError};
use crate::field::{FieldValidatorBuilder, ValidateField};
use crate::report::ValidationReport;
use std::fmt;
use tracing::debug;

type BoxedField<R> = Box<dyn ValidateField<R>>;
type PendingField<R> = Box<dyn FnOnce(&ValidatorConfig) -> Result<BoxedField<R>, ConfigError>>;

// ============================================================================
// RECORD VALIDATOR
// ============================================================================

/// Validates every configured field of a record of type `R`.
///
/// # Examples
///
/// ```rust
/// use bean_validator::{FieldValidator, RecordValidator};
///
/// struct Signup {
///     email: Option<String>,
///     accepted_terms: bool,
/// }
///
/// let validator = RecordValidator::builder()
///     .field(FieldValidator::named("email", |s: &Signup| &s.email).is_not_empty())
///     .field(FieldValidator::named("accepted_terms", |s: &Signup| &s.accepted_terms).is_true())
///     .build()
///     .unwrap();
///
/// let report = validator
///     .validate_all(&Signup { email: None, accepted_terms: false })
///     .unwrap();
/// assert_eq!(report.paths().collect::<Vec<_>>(), ["email", "accepted_terms"]);
/// ```
pub struct RecordValidator<R> {
    fields: Vec<BoxedField<R>>,
}

impl<R: 'static> RecordValidator<R> {
    /// Starts a builder with the default [`ValidatorConfig`].
    pub fn builder() -> RecordValidatorBuilder<R> {
        RecordValidatorBuilder::new()
    }
}

impl<R> RecordValidator<R> {
    /// Runs every field validator against `record` and merges the results.
    ///
    /// Fields are evaluated in the order they were added. Rule violations are
    /// not short-circuited: the report holds every one of them. Evaluation
    /// stops at the first [`EvaluationError`].
    pub fn validate_all(&self, record: &R) -> Result<ValidationReport, EvaluationError> {
        let mut report = ValidationReport::new();
        for field in &self.fields {
            report.merge(field.validate(record)?);
        }
        debug!(
            fields = self.fields.len(),
            errors = report.error_count(),
            "record validated"
        );
        Ok(report)
    }

    /// Paths of the configured fields, in evaluation order.
    pub fn field_paths(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.field_path())
    }

    /// Number of configured fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is configured.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<R> fmt::Debug for RecordValidator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordValidator")
            .field("fields", &self.field_paths().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Collects field validators for a [`RecordValidator`].
///
/// Field builders added with [`field`](Self::field) are finalized in
/// [`build`](Self::build) with this builder's [`ValidatorConfig`], so the
/// configuration can be set at any point of the chain.
pub struct RecordValidatorBuilder<R> {
    config: ValidatorConfig,
    pending: Vec<PendingField<R>>,
}

impl<R: 'static> Default for RecordValidatorBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: 'static> RecordValidatorBuilder<R> {
    /// Creates an empty builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: ValidatorConfig::default(),
            pending: Vec::new(),
        }
    }

    /// Replaces the configuration used to finalize field builders.
    #[must_use = "builder methods must be chained or built"]
    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a field from its builder.
    #[must_use = "builder methods must be chained or built"]
    pub fn field<V>(mut self, field: FieldValidatorBuilder<R, V>) -> Self
    where
        V: ?Sized + 'static,
    {
        self.pending.push(Box::new(
            move |config: &ValidatorConfig| -> Result<BoxedField<R>, ConfigError> {
                Ok(Box::new(field.build_with(config)?))
            },
        ));
        self
    }

    /// Adds an already finalized field validator.
    ///
    /// Accepts a built [`FieldValidator`](crate::FieldValidator) as well as
    /// any custom [`ValidateField`] implementation.
    #[must_use = "builder methods must be chained or built"]
    pub fn validator(mut self, field: impl ValidateField<R> + 'static) -> Self {
        self.pending.push(Box::new(
            move |_: &ValidatorConfig| -> Result<BoxedField<R>, ConfigError> {
                Ok(Box::new(field))
            },
        ));
        self
    }

    /// Finalizes every field.
    ///
    /// Fails on the first field whose path cannot be resolved or whose
    /// configuration is invalid.
    pub fn build(self) -> Result<RecordValidator<R>, ConfigError> {
        let config = self.config;
        let fields = self
            .pending
            .into_iter()
            .map(|finalize| finalize(&config))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RecordValidator { fields })
    }
}

impl<R> fmt::Debug for RecordValidatorBuilder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordValidatorBuilder")
            .field("config", &self.config)
            .field("pending", &self.pending.len())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
