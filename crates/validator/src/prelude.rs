//! Prelude module for convenient imports.
//!
//! Provides a single `use bean_validator::prelude::*;` import that brings in
//! the builders, the report, and the value model.
//!
//! # Examples
//!
//! ```rust
//! use bean_validator::prelude::*;
//!
//! struct Flag {
//!     enabled: Option<bool>,
//! }
//!
//! let validator = RecordValidator::builder()
//!     .field(FieldValidator::named("enabled", |f: &Flag| &f.enabled).is_true())
//!     .build()
//!     .unwrap();
//! let report = validator.validate_all(&Flag { enabled: Some(true) }).unwrap();
//! assert!(report.is_valid());
//! ```

// ============================================================================
// VALIDATORS: Builders and finalized validators
// ============================================================================

pub use crate::field::{FieldValidator, FieldValidatorBuilder, ValidateField};
pub use crate::record::{RecordValidator, RecordValidatorBuilder};
pub use crate::rule::{Polarity, Rule};

// ============================================================================
// RESULTS: Reports and errors
// ============================================================================

pub use crate::error::{ConfigError, EvaluationError, ValidationError};
pub use crate::report::ValidationReport;

// ============================================================================
// VALUE MODEL AND CONFIGURATION
// ============================================================================

pub use crate::config::ValidatorConfig;
pub use crate::naming::{AccessorNameStrategy, NamingStrategy};
pub use crate::record_value;
pub use crate::value::{FieldValue, ValueShape};
