//! Field validators
//!
//! A [`FieldValidator`] reads one field off a record through an accessor,
//! checks its rules against the value and runs nested record validators on
//! it. It reports everything it finds in a scoped [`ValidationReport`] whose
//! paths are already fully qualified from this field downwards.
//!
//! A null value handed to a nested validator attached with
//! [`with_record_validator`](FieldValidatorBuilder::with_record_validator)
//! stops evaluation with [`EvaluationError::NullNestedValue`]; nested
//! validators attached with
//! [`with_optional_record_validator`](FieldValidatorBuilder::with_optional_record_validator)
//! skip null values.
//!
//! Validators are put together with a [`FieldValidatorBuilder`] and are
//! immutable once built.
//!
//! # Examples
//!
//! ```rust
//! use bean_validator::FieldValidator;
//!
//! struct Customer {
//!     email: Option<String>,
//! }
//!
//! let email = FieldValidator::named("email", |c: &Customer| &c.email)
//!     .is_not_null()
//!     .is_not_empty()
//!     .build()
//!     .unwrap();
//!
//! let report = email.validate(&Customer { email: None }).unwrap();
//! let keys: Vec<_> = report.errors_for("email").unwrap().iter().map(|e| e.key()).collect();
//! assert_eq!(keys, ["is_not_null", "is_not_empty"]);
//! ```

use crate::config::ValidatorConfig;
use crate::error::{ConfigError, EvaluationError};
use crate::naming::{NamingStrategy, SharedNamingStrategy};
use crate::record::RecordValidator;
use crate::report::ValidationReport;
use crate::rule::{Polarity, Rule};
use crate::value::FieldValue;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

type Accessor<R, V> = Box<dyn Fn(&R) -> &V + Send + Sync>;
type NestedCheck<V> =
    Box<dyn Fn(&V) -> Option<Result<ValidationReport, EvaluationError>> + Send + Sync>;

/// A record validator applied to the present field value.
struct Nested<V: ?Sized> {
    check: NestedCheck<V>,
    optional: bool,
}

// ============================================================================
// VALIDATE FIELD TRAIT
// ============================================================================

/// A finalized validator for one field of `R`.
///
/// [`RecordValidator`] stores its fields behind this trait so fields of
/// different value types can live in one record validator.
pub trait ValidateField<R>: Send + Sync {
    /// Fully resolved path of the field.
    fn field_path(&self) -> &str;

    /// Evaluates the field of `record` into a scoped report.
    fn validate(&self, record: &R) -> Result<ValidationReport, EvaluationError>;
}

// ============================================================================
// FIELD VALIDATOR
// ============================================================================

/// Rules and nested validators for one field of `R` holding a `V`.
pub struct FieldValidator<R, V: ?Sized> {
    accessor: Accessor<R, V>,
    path: String,
    separator: Cow<'static, str>,
    rules: Vec<Rule<V>>,
    nested: Vec<Nested<V>>,
}

impl<R: 'static, V: ?Sized + 'static> FieldValidator<R, V> {
    /// Starts a builder for the field read by `accessor`.
    ///
    /// The field path has to be given with
    /// [`named`](FieldValidatorBuilder::named) or derived by a naming
    /// strategy before [`build`](FieldValidatorBuilder::build).
    pub fn builder<F>(accessor: F) -> FieldValidatorBuilder<R, V>
    where
        F: Fn(&R) -> &V + Send + Sync + 'static,
    {
        FieldValidatorBuilder {
            accessor_name: std::any::type_name::<F>(),
            accessor: Box::new(accessor),
            path: None,
            separator: None,
            naming: None,
            rules: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Starts a builder for the field read by `accessor`, reported as `path`.
    pub fn named<F>(path: impl Into<String>, accessor: F) -> FieldValidatorBuilder<R, V>
    where
        F: Fn(&R) -> &V + Send + Sync + 'static,
    {
        Self::builder(accessor).named(path)
    }
}

impl<R, V: ?Sized> FieldValidator<R, V> {
    /// Fully resolved path of the field.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Separator used to glue this field's path to nested paths.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[Rule<V>] {
        &self.rules
    }

    /// Number of nested record validators.
    pub fn nested_count(&self) -> usize {
        self.nested.len()
    }

    /// Evaluates the field of `record`.
    ///
    /// Rules that must hold are checked first, then rules that must fail,
    /// each group in declaration order. Nested reports are merged below this
    /// field's path with this field's separator.
    ///
    /// Fails if the value is null and a required nested validator is
    /// attached, or if a nested validator fails further down.
    pub fn validate(&self, record: &R) -> Result<ValidationReport, EvaluationError> {
        let value = (self.accessor)(record);
        let mut report = ValidationReport::with_separator(self.separator.clone());

        for polarity in [Polarity::MustBeTrue, Polarity::MustBeFalse] {
            for rule in self.rules.iter().filter(|r| r.polarity() == polarity) {
                if rule.is_violated_by(value) {
                    trace!(field = %self.path, key = rule.key(), "rule violated");
                    report.add_error(self.path.clone(), rule.key_cow().clone());
                }
            }
        }

        for nested in &self.nested {
            match (nested.check)(value) {
                Some(child) => {
                    let child = child.map_err(|e| e.under(&self.path, &self.separator))?;
                    report.merge_under(&self.path, child);
                }
                None if nested.optional => {
                    trace!(field = %self.path, "null value, optional nested validator skipped");
                }
                None => {
                    debug!(field = %self.path, "null value reached a nested validator");
                    return Err(EvaluationError::NullNestedValue {
                        path: self.path.clone(),
                    });
                }
            }
        }

        Ok(report)
    }
}

impl<R, V: ?Sized> ValidateField<R> for FieldValidator<R, V> {
    fn field_path(&self) -> &str {
        &self.path
    }

    fn validate(&self, record: &R) -> Result<ValidationReport, EvaluationError> {
        FieldValidator::validate(self, record)
    }
}

impl<R, V: ?Sized> fmt::Debug for FieldValidator<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValidator")
            .field("path", &self.path)
            .field("separator", &self.separator)
            .field("rules", &self.rules)
            .field("nested", &self.nested.len())
            .field("accessor", &"<function>")
            .finish()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Collects the configuration of a [`FieldValidator`].
pub struct FieldValidatorBuilder<R, V: ?Sized> {
    accessor: Accessor<R, V>,
    accessor_name: &'static str,
    path: Option<String>,
    separator: Option<Cow<'static, str>>,
    naming: Option<SharedNamingStrategy>,
    rules: Vec<Rule<V>>,
    nested: Vec<Nested<V>>,
}

impl<R, V: ?Sized> FieldValidatorBuilder<R, V> {
    /// Sets the field path reported in errors.
    #[must_use = "builder methods must be chained or built"]
    pub fn named(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the separator between this field's path and nested paths.
    ///
    /// Defaults to `"."`, or to the configured separator when built through a
    /// [`RecordValidatorBuilder`](crate::RecordValidatorBuilder).
    #[must_use = "builder methods must be chained or built"]
    pub fn separator(mut self, separator: impl Into<Cow<'static, str>>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Derives the field path with `strategy` if none is given explicitly.
    #[must_use = "builder methods must be chained or built"]
    pub fn naming(mut self, strategy: impl NamingStrategy + 'static) -> Self {
        self.naming = Some(Arc::new(strategy));
        self
    }

    /// Like [`naming`](Self::naming) with an already shared strategy.
    #[must_use = "builder methods must be chained or built"]
    pub fn shared_naming(mut self, strategy: SharedNamingStrategy) -> Self {
        self.naming = Some(strategy);
        self
    }

    /// Adds a rule.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(mut self, rule: Rule<V>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Finalizes with default settings.
    pub fn build(self) -> Result<FieldValidator<R, V>, ConfigError> {
        self.build_with(&ValidatorConfig::default())
    }

    /// Finalizes, filling unset options from `config`.
    pub(crate) fn build_with(
        self,
        config: &ValidatorConfig,
    ) -> Result<FieldValidator<R, V>, ConfigError> {
        let accessor = self.accessor_name;

        let path = match self.path {
            Some(path) => path,
            None => {
                let strategy = self.naming.or_else(|| config.naming_strategy());
                let derived = strategy.and_then(|s| s.field_name(accessor));
                match derived {
                    Some(path) => {
                        debug!(accessor, path = %path, "derived field path");
                        path
                    }
                    None => {
                        return Err(ConfigError::UnresolvedFieldPath {
                            accessor: accessor.to_owned(),
                        });
                    }
                }
            }
        };

        if path.is_empty() {
            return Err(ConfigError::EmptyFieldPath {
                accessor: accessor.to_owned(),
            });
        }

        if self.rules.iter().any(|rule| rule.key().is_empty()) {
            return Err(ConfigError::EmptyRuleKey { field: path });
        }

        let separator = self
            .separator
            .unwrap_or_else(|| Cow::Owned(config.separator.clone()));

        Ok(FieldValidator {
            accessor: self.accessor,
            path,
            separator,
            rules: self.rules,
            nested: self.nested,
        })
    }
}

// Rule names mirror the checks they register, not getters on the builder.
#[allow(clippy::wrong_self_convention)]
impl<R, V: FieldValue + ?Sized + 'static> FieldValidatorBuilder<R, V> {
    /// The value must be null.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_null(self) -> Self {
        self.rule(Rule::is_null())
    }

    /// The value must not be null.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_not_null(self) -> Self {
        self.rule(Rule::is_not_null())
    }

    /// A container value must be empty; null and non-containers pass.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_empty(self) -> Self {
        self.rule(Rule::is_empty())
    }

    /// The value must be present and, if a container, non-empty.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_not_empty(self) -> Self {
        self.rule(Rule::is_not_empty())
    }

    /// A boolean value must be `true`; null fails.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_true(self) -> Self {
        self.rule(Rule::is_true())
    }

    /// A boolean value must be `false`; null fails.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_false(self) -> Self {
        self.rule(Rule::is_false())
    }

    /// The value must be present and satisfy `predicate`, else `key` is reported.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_true_that<P>(self, key: impl Into<Cow<'static, str>>, predicate: P) -> Self
    where
        P: Fn(&V::Inner) -> bool + Send + Sync + 'static,
    {
        self.rule(Rule::is_true_that(key, predicate))
    }

    /// The value must be present and not satisfy `predicate`, else `key` is reported.
    #[must_use = "builder methods must be chained or built"]
    pub fn is_false_that<P>(self, key: impl Into<Cow<'static, str>>, predicate: P) -> Self
    where
        P: Fn(&V::Inner) -> bool + Send + Sync + 'static,
    {
        self.rule(Rule::is_false_that(key, predicate))
    }

    /// Validates the field value with `validator`.
    ///
    /// Its errors are reported below this field's path. A null value makes
    /// evaluation fail with [`EvaluationError::NullNestedValue`].
    #[must_use = "builder methods must be chained or built"]
    pub fn with_record_validator(
        self,
        validator: impl Into<Arc<RecordValidator<V::Inner>>>,
    ) -> Self
    where
        V::Inner: Sized + 'static,
    {
        self.nest(validator.into(), false)
    }

    /// Like [`with_record_validator`](Self::with_record_validator), but a null
    /// value is skipped.
    ///
    /// Pair with [`is_not_null`](Self::is_not_null) to report a missing value
    /// as a validation error instead.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_optional_record_validator(
        self,
        validator: impl Into<Arc<RecordValidator<V::Inner>>>,
    ) -> Self
    where
        V::Inner: Sized + 'static,
    {
        self.nest(validator.into(), true)
    }

    fn nest(mut self, validator: Arc<RecordValidator<V::Inner>>, optional: bool) -> Self
    where
        V::Inner: Sized + 'static,
    {
        self.nested.push(Nested {
            check: Box::new(move |value: &V| {
                value.present().map(|inner| validator.validate_all(inner))
            }),
            optional,
        });
        self
    }
}

impl<R, V: ?Sized> fmt::Debug for FieldValidatorBuilder<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValidatorBuilder")
            .field("accessor", &self.accessor_name)
            .field("path", &self.path)
            .field("separator", &self.separator)
            .field("rules", &self.rules)
            .field("nested", &self.nested.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::AccessorNameStrategy;
    use pretty_assertions::assert_eq;

    struct Bean {
        id: Option<String>,
        messages: Option<Vec<String>>,
        simple: bool,
        complicated: Option<bool>,
    }

    impl Bean {
        fn empty() -> Self {
            Self {
                id: None,
                messages: None,
                simple: false,
                complicated: None,
            }
        }

        fn get_messages(&self) -> &Option<Vec<String>> {
            &self.messages
        }
    }

    fn keys(report: &ValidationReport, path: &str) -> Vec<String> {
        report
            .errors_for(path)
            .unwrap_or_default()
            .iter()
            .map(|e| e.key().to_owned())
            .collect()
    }

    #[test]
    fn test_null_id_fails_both_rules() {
        let validator = FieldValidator::named("id", |b: &Bean| &b.id)
            .is_not_null()
            .is_not_empty()
            .build()
            .unwrap();

        let report = validator.validate(&Bean::empty()).unwrap();
        assert_eq!(keys(&report, "id"), ["is_not_null", "is_not_empty"]);
        assert_eq!(report.error_count(), 2);
    }

    #[test]
    fn test_must_hold_rules_come_first() {
        let validator = FieldValidator::named("id", |b: &Bean| &b.id)
            .is_not_empty()
            .is_not_null()
            .build()
            .unwrap();

        let report = validator.validate(&Bean::empty()).unwrap();
        assert_eq!(keys(&report, "id"), ["is_not_null", "is_not_empty"]);
    }

    #[test]
    fn test_valid_value_yields_clean_report() {
        let validator = FieldValidator::named("id", |b: &Bean| &b.id)
            .is_not_null()
            .is_not_empty()
            .build()
            .unwrap();

        let bean = Bean {
            id: Some("42".to_owned()),
            ..Bean::empty()
        };
        let report = validator.validate(&bean).unwrap();
        assert!(report.is_valid());
        assert!(report.errors_for("id").is_none());
    }

    #[test]
    fn test_plain_bool_field() {
        let must_be_true = FieldValidator::named("simple", |b: &Bean| &b.simple)
            .is_true()
            .build()
            .unwrap();
        let must_be_false = FieldValidator::named("simple", |b: &Bean| &b.simple)
            .is_false()
            .build()
            .unwrap();

        let bean = Bean::empty();
        let report = must_be_true.validate(&bean).unwrap();
        assert_eq!(keys(&report, "simple"), ["is_true"]);
        assert!(must_be_false.validate(&bean).unwrap().is_valid());
    }

    #[test]
    fn test_nullable_bool_field() {
        let validator = FieldValidator::named("complicated", |b: &Bean| &b.complicated)
            .is_false()
            .build()
            .unwrap();

        assert_eq!(
            keys(&validator.validate(&Bean::empty()).unwrap(), "complicated"),
            ["is_false"]
        );
        let bean = Bean {
            complicated: Some(false),
            ..Bean::empty()
        };
        assert!(validator.validate(&bean).unwrap().is_valid());
    }

    #[test]
    fn test_predicate_rules() {
        let validator = FieldValidator::named("messages", |b: &Bean| &b.messages)
            .is_true_that("size_greater_0", |m: &Vec<String>| !m.is_empty())
            .build()
            .unwrap();

        let bean = Bean {
            messages: Some(Vec::new()),
            ..Bean::empty()
        };
        let report = validator.validate(&bean).unwrap();
        assert_eq!(keys(&report, "messages"), ["size_greater_0"]);

        let bean = Bean {
            messages: Some(vec!["value".to_owned()]),
            ..Bean::empty()
        };
        assert!(validator.validate(&bean).unwrap().is_valid());
    }

    #[test]
    fn test_unnamed_closure_is_a_config_error() {
        let err = FieldValidator::builder(|b: &Bean| &b.id)
            .is_not_null()
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnresolvedFieldPath { .. }));
    }

    #[test]
    fn test_closure_cannot_be_derived_either() {
        let err = FieldValidator::builder(|b: &Bean| &b.id)
            .naming(AccessorNameStrategy)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnresolvedFieldPath { .. }));
    }

    #[test]
    fn test_method_accessor_is_derived() {
        let validator = FieldValidator::builder(Bean::get_messages)
            .naming(AccessorNameStrategy)
            .is_not_null()
            .build()
            .unwrap();

        assert_eq!(validator.path(), "messages");
        let report = validator.validate(&Bean::empty()).unwrap();
        assert_eq!(keys(&report, "messages"), ["is_not_null"]);
    }

    #[test]
    fn test_config_enables_derivation() {
        let config = ValidatorConfig::new().with_derived_field_names(true);
        let validator = FieldValidator::builder(Bean::get_messages)
            .is_not_empty()
            .build_with(&config)
            .unwrap();
        assert_eq!(validator.path(), "messages");
    }

    #[test]
    fn test_explicit_name_wins_over_strategy() {
        let validator = FieldValidator::builder(Bean::get_messages)
            .naming(AccessorNameStrategy)
            .named("msgs")
            .build()
            .unwrap();
        assert_eq!(validator.path(), "msgs");
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let err = FieldValidator::named("", |b: &Bean| &b.id).build().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyFieldPath { .. }));
    }

    #[test]
    fn test_empty_rule_key_is_rejected() {
        let err = FieldValidator::named("id", |b: &Bean| &b.id)
            .is_true_that("", |id: &String| !id.is_empty())
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyRuleKey { field } if field == "id"));
    }

    #[test]
    fn test_separator_defaults() {
        let plain = FieldValidator::named("id", |b: &Bean| &b.id).build().unwrap();
        assert_eq!(plain.separator(), ".");

        let config = ValidatorConfig::new().with_separator("/");
        let configured = FieldValidator::named("id", |b: &Bean| &b.id)
            .build_with(&config)
            .unwrap();
        assert_eq!(configured.separator(), "/");

        let explicit = FieldValidator::named("id", |b: &Bean| &b.id)
            .separator("#")
            .build_with(&config)
            .unwrap();
        assert_eq!(explicit.separator(), "#");
    }

    #[test]
    fn test_str_accessor() {
        struct Named {
            name: String,
        }

        let validator = FieldValidator::named("name", |n: &Named| n.name.as_str())
            .is_not_empty()
            .build()
            .unwrap();
        let report = validator
            .validate(&Named {
                name: String::new(),
            })
            .unwrap();
        assert_eq!(keys(&report, "name"), ["is_not_empty"]);
    }

    struct Holder {
        bean: Option<Bean>,
    }

    crate::record_value!(Bean);

    fn bean_validator() -> RecordValidator<Bean> {
        RecordValidator::builder()
            .field(FieldValidator::named("id", |b: &Bean| &b.id).is_not_null())
            .build()
            .unwrap()
    }

    #[test]
    fn test_null_value_with_nested_validator_fails_evaluation() {
        let validator = FieldValidator::named("bean", |h: &Holder| &h.bean)
            .with_record_validator(bean_validator())
            .build()
            .unwrap();

        let err = validator.validate(&Holder { bean: None }).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::NullNestedValue {
                path: "bean".to_owned()
            }
        );
    }

    #[test]
    fn test_null_value_fails_even_with_is_not_null() {
        let validator = FieldValidator::named("bean", |h: &Holder| &h.bean)
            .is_not_null()
            .with_record_validator(bean_validator())
            .build()
            .unwrap();

        let err = validator.validate(&Holder { bean: None }).unwrap_err();
        assert_eq!(err.path(), "bean");
    }

    #[test]
    fn test_optional_nested_validator_skips_null() {
        let validator = FieldValidator::named("bean", |h: &Holder| &h.bean)
            .is_not_null()
            .with_optional_record_validator(bean_validator())
            .build()
            .unwrap();

        let report = validator.validate(&Holder { bean: None }).unwrap();
        assert_eq!(report.paths().collect::<Vec<_>>(), ["bean"]);
        assert_eq!(keys(&report, "bean"), ["is_not_null"]);
    }

    #[test]
    fn test_present_nested_value_is_evaluated() {
        let validator = FieldValidator::named("bean", |h: &Holder| &h.bean)
            .separator("/")
            .with_record_validator(bean_validator())
            .build()
            .unwrap();

        let report = validator
            .validate(&Holder {
                bean: Some(Bean::empty()),
            })
            .unwrap();
        assert_eq!(keys(&report, "bean/id"), ["is_not_null"]);
        assert_eq!(validator.nested_count(), 1);
    }

    #[test]
    fn test_debug_output() {
        let validator = FieldValidator::named("id", |b: &Bean| &b.id)
            .is_not_null()
            .build()
            .unwrap();
        let debug = format!("{validator:?}");
        assert!(debug.contains("FieldValidator"));
        assert!(debug.contains("is_not_null"));
    }
}
