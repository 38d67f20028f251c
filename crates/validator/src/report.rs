//! Validation report and path composition
//!
//! A [`ValidationReport`] maps field paths to the errors found there. Reports
//! produced at different nesting levels are combined with [`merge`] (paths
//! kept as they are) or [`merge_under`] (paths re-homed below a prefix).
//!
//! [`merge_under`] always glues with the separator of the report *receiving*
//! the merge. A field validator creates its scoped report with its own
//! separator, so every nesting level decides how its own name is joined to
//! the paths coming up from its children:
//!
//! ```rust
//! use bean_validator::ValidationReport;
//!
//! let mut innermost = ValidationReport::new();
//! innermost.add_error("items", "is_not_null");
//!
//! let mut inner = ValidationReport::with_separator("~");
//! inner.merge_under("simple_property", innermost);
//!
//! let mut outer = ValidationReport::with_separator("#");
//! outer.merge_under("nested", inner);
//!
//! assert!(outer.errors_for("nested#simple_property~items").is_some());
//! ```
//!
//! [`merge`]: ValidationReport::merge
//! [`merge_under`]: ValidationReport::merge_under

use crate::error::ValidationError;
use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::Serialize;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Errors reported for a single path. Most paths fail one or two rules.
pub type ErrorList = SmallVec<[ValidationError; 2]>;

// ============================================================================
// VALIDATION REPORT
// ============================================================================

/// Every violated rule of one evaluation, keyed by field path.
///
/// Paths keep the order in which they first failed; errors within a path keep
/// insertion order. A path is only present if at least one error was
/// reported for it, so `is_valid()` is exactly "no entries".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    #[serde(skip)]
    separator: Cow<'static, str>,
    #[serde(flatten)]
    entries: IndexMap<String, ErrorList>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationReport {
    /// Creates an empty report using [`DEFAULT_SEPARATOR`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    /// Creates an empty report whose [`merge_under`](Self::merge_under) uses `separator`.
    #[must_use]
    pub fn with_separator(separator: impl Into<Cow<'static, str>>) -> Self {
        Self {
            separator: separator.into(),
            entries: IndexMap::new(),
        }
    }

    /// Separator this report glues prefixes with.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Records that the rule `key` failed for `path`.
    pub fn add_error(&mut self, path: impl Into<String>, key: impl Into<Cow<'static, str>>) {
        self.push(ValidationError::new(path, key));
    }

    /// Records a ready-made error under its own path.
    pub fn push(&mut self, error: ValidationError) {
        self.entries
            .entry(error.path().to_owned())
            .or_default()
            .push(error);
    }

    /// Appends every error of `other` under the same path.
    ///
    /// Errors for a path that already failed here are appended after the
    /// existing ones.
    pub fn merge(&mut self, other: ValidationReport) {
        for (path, errors) in other.entries {
            self.entries.entry(path).or_default().extend(errors);
        }
    }

    /// Appends every error of `other` below `prefix`.
    ///
    /// Each path of `other` becomes `prefix + self.separator() + path` and the
    /// errors are rewritten to carry the new path. The separator of `other` is
    /// not consulted.
    pub fn merge_under(&mut self, prefix: &str, other: ValidationReport) {
        for (path, errors) in other.entries {
            let composed = self.compose(prefix, &path);
            let slot = self.entries.entry(composed.clone()).or_default();
            slot.extend(errors.into_iter().map(|mut error| {
                error.rehome(composed.clone());
                error
            }));
        }
    }

    fn compose(&self, prefix: &str, path: &str) -> String {
        let mut composed = String::with_capacity(prefix.len() + self.separator.len() + path.len());
        composed.push_str(prefix);
        composed.push_str(&self.separator);
        composed.push_str(path);
        composed
    }

    /// Returns `true` if no rule failed.
    pub fn is_valid(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if at least one rule failed.
    pub fn has_errors(&self) -> bool {
        !self.is_valid()
    }

    /// Errors reported for `path`, or `None` if that path never failed.
    pub fn errors_for(&self, path: &str) -> Option<&[ValidationError]> {
        self.entries.get(path).map(SmallVec::as_slice)
    }

    /// The full path to errors mapping.
    pub fn entries(&self) -> &IndexMap<String, ErrorList> {
        &self.entries
    }

    /// Iterates `(path, errors)` in the order paths first failed.
    pub fn iter(&self) -> Iter<'_, String, ErrorList> {
        self.entries.iter()
    }

    /// Paths that failed at least one rule.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All errors, path by path.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.entries.values().flatten()
    }

    /// Total number of errors across all paths.
    pub fn error_count(&self) -> usize {
        self.entries.values().map(SmallVec::len).sum()
    }

    /// Consumes the report and returns the underlying mapping.
    pub fn into_entries(self) -> IndexMap<String, ErrorList> {
        self.entries
    }

    /// `Ok(())` when valid, otherwise the report itself as the error.
    #[must_use = "result must be used"]
    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_valid() { Ok(()) } else { Err(self) }
    }

    /// Converts the report to a JSON object of `path -> [key, ...]`.
    pub fn to_json_value(&self) -> serde_json::Value {
        let object = self
            .entries
            .iter()
            .map(|(path, errors)| {
                let keys = errors
                    .iter()
                    .map(|e| serde_json::Value::String(e.key().to_owned()))
                    .collect();
                (path.clone(), serde_json::Value::Array(keys))
            })
            .collect();
        serde_json::Value::Object(object)
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = (&'a String, &'a ErrorList);
    type IntoIter = Iter<'a, String, ErrorList>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<ValidationError> for ValidationReport {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        for error in iter {
            self.push(error);
        }
    }
}

impl FromIterator<ValidationError> for ValidationReport {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        let mut report = Self::new();
        report.extend(iter);
        report
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "Validation passed");
        }
        writeln!(f, "Validation failed with {} error(s):", self.error_count())?;
        for (i, error) in self.errors().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

// ============================================================================
// TESTS
// ============================================================================
