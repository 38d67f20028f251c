//! Rules attached to a single field
//!
//! A [`Rule`] is a symbolic key, a predicate over the field value, and a
//! [`Polarity`] saying whether the predicate must hold or must not hold.
//! The built-in constructors in this module encode the null and emptiness
//! semantics of the standard rules:
//!
//! | Constructor | Key | Violated when |
//! |---|---|---|
//! | [`Rule::is_null`] | `is_null` | value present |
//! | [`Rule::is_not_null`] | `is_not_null` | value null |
//! | [`Rule::is_empty`] | `is_empty` | non-empty container |
//! | [`Rule::is_not_empty`] | `is_not_empty` | null or empty container |
//! | [`Rule::is_true`] | `is_true` | null or `false` |
//! | [`Rule::is_false`] | `is_false` | null or `true` |
//! | [`Rule::is_true_that`] | caller key | null or predicate `false` |
//! | [`Rule::is_false_that`] | caller key | null or predicate `true` |
//!
//! Values that are neither containers nor booleans pass the emptiness and
//! boolean rules.

use crate::value::{FieldValue, ValueShape};
use std::borrow::Cow;
use std::fmt;

/// Keys reported by the built-in rules.
pub mod keys {
    /// Key of [`Rule::is_null`](super::Rule::is_null).
    pub const IS_NULL: &str = "is_null";
    /// Key of [`Rule::is_not_null`](super::Rule::is_not_null).
    pub const IS_NOT_NULL: &str = "is_not_null";
    /// Key of [`Rule::is_empty`](super::Rule::is_empty).
    pub const IS_EMPTY: &str = "is_empty";
    /// Key of [`Rule::is_not_empty`](super::Rule::is_not_empty).
    pub const IS_NOT_EMPTY: &str = "is_not_empty";
    /// Key of [`Rule::is_true`](super::Rule::is_true).
    pub const IS_TRUE: &str = "is_true";
    /// Key of [`Rule::is_false`](super::Rule::is_false).
    pub const IS_FALSE: &str = "is_false";
}

type Predicate<V> = Box<dyn Fn(&V) -> bool + Send + Sync>;

// ============================================================================
// POLARITY
// ============================================================================

/// Whether a rule's predicate has to hold or has to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// The rule is violated when the predicate returns `false`.
    MustBeTrue,
    /// The rule is violated when the predicate returns `true`.
    MustBeFalse,
}

// ============================================================================
// RULE
// ============================================================================

/// A named predicate over a field value of type `V`.
pub struct Rule<V: ?Sized> {
    key: Cow<'static, str>,
    polarity: Polarity,
    predicate: Predicate<V>,
}

impl<V: ?Sized> Rule<V> {
    /// Creates a rule from a raw predicate over the whole field value.
    ///
    /// The predicate sees the value as the accessor returned it, null
    /// wrappers included.
    pub fn new<P>(key: impl Into<Cow<'static, str>>, polarity: Polarity, predicate: P) -> Self
    where
        P: Fn(&V) -> bool + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            polarity,
            predicate: Box::new(predicate),
        }
    }

    /// Rule key reported on violation.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn key_cow(&self) -> &Cow<'static, str> {
        &self.key
    }

    /// Whether the predicate must hold or must fail.
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Returns `true` if `value` violates this rule.
    pub fn is_violated_by(&self, value: &V) -> bool {
        let outcome = (self.predicate)(value);
        match self.polarity {
            Polarity::MustBeTrue => !outcome,
            Polarity::MustBeFalse => outcome,
        }
    }
}

impl<V: FieldValue + ?Sized + 'static> Rule<V> {
    /// The value must be null.
    pub fn is_null() -> Self {
        Self::new(keys::IS_NULL, Polarity::MustBeTrue, |v: &V| {
            v.shape().is_null()
        })
    }

    /// The value must not be null.
    pub fn is_not_null() -> Self {
        Self::new(keys::IS_NOT_NULL, Polarity::MustBeTrue, |v: &V| {
            !v.shape().is_null()
        })
    }

    /// A container value must be empty. Null and non-container values pass.
    pub fn is_empty() -> Self {
        Self::new(keys::IS_EMPTY, Polarity::MustBeTrue, |v: &V| {
            v.shape().container_is_empty().unwrap_or(true)
        })
    }

    /// The value must be present and, if it is a container, non-empty.
    pub fn is_not_empty() -> Self {
        Self::new(keys::IS_NOT_EMPTY, Polarity::MustBeFalse, |v: &V| {
            match v.shape() {
                ValueShape::Null => true,
                shape => shape.container_is_empty().unwrap_or(false),
            }
        })
    }

    /// A boolean value must be `true`. Null fails, non-booleans pass.
    pub fn is_true() -> Self {
        Self::new(keys::IS_TRUE, Polarity::MustBeTrue, |v: &V| {
            match v.shape() {
                ValueShape::Null => false,
                ValueShape::Bool(b) => b,
                _ => true,
            }
        })
    }

    /// A boolean value must be `false`. Null fails, non-booleans pass.
    pub fn is_false() -> Self {
        Self::new(keys::IS_FALSE, Polarity::MustBeFalse, |v: &V| {
            match v.shape() {
                ValueShape::Null => true,
                ValueShape::Bool(b) => b,
                _ => false,
            }
        })
    }

    /// The value must be present and satisfy `predicate`.
    pub fn is_true_that<P>(key: impl Into<Cow<'static, str>>, predicate: P) -> Self
    where
        P: Fn(&V::Inner) -> bool + Send + Sync + 'static,
    {
        Self::new(key, Polarity::MustBeTrue, move |v: &V| {
            v.present().is_some_and(&predicate)
        })
    }

    /// The value must be present and not satisfy `predicate`.
    pub fn is_false_that<P>(key: impl Into<Cow<'static, str>>, predicate: P) -> Self
    where
        P: Fn(&V::Inner) -> bool + Send + Sync + 'static,
    {
        Self::new(key, Polarity::MustBeFalse, move |v: &V| {
            v.present().is_none_or(&predicate)
        })
    }
}

impl<V: ?Sized> fmt::Debug for Rule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("key", &self.key)
            .field("polarity", &self.polarity)
            .field("predicate", &"<function>")
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn fires<V: ?Sized>(rule: &Rule<V>, value: &V) -> bool {
        rule.is_violated_by(value)
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(String::new()), true)]
    #[case(Some("x".to_owned()), true)]
    fn test_is_null(#[case] value: Option<String>, #[case] expected: bool) {
        assert_eq!(fires(&Rule::is_null(), &value), expected);
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(String::new()), false)]
    #[case(Some("x".to_owned()), false)]
    fn test_is_not_null(#[case] value: Option<String>, #[case] expected: bool) {
        assert_eq!(fires(&Rule::is_not_null(), &value), expected);
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(vec![]), false)]
    #[case(Some(vec![1]), true)]
    fn test_is_empty(#[case] value: Option<Vec<i32>>, #[case] expected: bool) {
        assert_eq!(fires(&Rule::is_empty(), &value), expected);
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(vec![]), true)]
    #[case(Some(vec![1]), false)]
    fn test_is_not_empty(#[case] value: Option<Vec<i32>>, #[case] expected: bool) {
        assert_eq!(fires(&Rule::is_not_empty(), &value), expected);
    }

    #[test]
    fn test_emptiness_ignores_objects() {
        let number = Some(0_i64);
        assert!(!fires(&Rule::is_empty(), &number));
        assert!(!fires(&Rule::is_not_empty(), &number));
    }

    #[test]
    fn test_emptiness_on_maps() {
        let empty: HashMap<String, String> = HashMap::new();
        assert!(fires(&Rule::is_not_empty(), &empty));
        assert!(!fires(&Rule::is_empty(), &empty));
    }

    #[rstest]
    #[case(None, true, true)]
    #[case(Some(true), false, true)]
    #[case(Some(false), true, false)]
    fn test_boolean_rules(
        #[case] value: Option<bool>,
        #[case] is_true_fires: bool,
        #[case] is_false_fires: bool,
    ) {
        assert_eq!(fires(&Rule::is_true(), &value), is_true_fires);
        assert_eq!(fires(&Rule::is_false(), &value), is_false_fires);
    }

    #[test]
    fn test_boolean_rules_pass_non_booleans() {
        let value = Some(vec![1]);
        assert!(!fires(&Rule::is_true(), &value));
        assert!(!fires(&Rule::is_false(), &value));
    }

    #[test]
    fn test_predicate_rules_fire_on_null() {
        let value: Option<Vec<String>> = None;
        let must_hold = Rule::is_true_that("size_greater_0", |v: &Vec<String>| !v.is_empty());
        let must_fail = Rule::is_false_that("size_lower_1", |v: &Vec<String>| v.len() <= 1);
        assert!(fires(&must_hold, &value));
        assert!(fires(&must_fail, &value));
    }

    #[test]
    fn test_predicate_rules_on_present_value() {
        let value = Some(vec!["a".to_owned(), "b".to_owned()]);
        let must_hold = Rule::is_true_that("size_greater_0", |v: &Vec<String>| !v.is_empty());
        let must_fail = Rule::is_false_that("size_lower_1", |v: &Vec<String>| v.len() <= 1);
        assert!(!fires(&must_hold, &value));
        assert!(!fires(&must_fail, &value));
        assert_eq!(must_hold.key(), "size_greater_0");
        assert_eq!(must_fail.polarity(), Polarity::MustBeFalse);
    }

    #[test]
    fn test_raw_rule_sees_whole_value() {
        let rule = Rule::new("even_when_present", Polarity::MustBeTrue, |v: &Option<u8>| {
            v.is_none_or(|n| n % 2 == 0)
        });
        assert!(!fires(&rule, &None));
        assert!(fires(&rule, &Some(3)));
    }

    #[test]
    fn test_debug_hides_predicate() {
        let rule: Rule<Option<u8>> = Rule::is_not_null();
        let debug = format!("{rule:?}");
        assert!(debug.contains("is_not_null"));
        assert!(debug.contains("<function>"));
    }
}
