//! # bean-validator
//!
//! Declarative validation of nested records. Rules are attached to fields
//! through accessors, record validators are composed into trees that mirror
//! the record nesting, and one evaluation reports every violated rule keyed
//! by the field's path.
//!
//! ## Quick Start
//!
//! ```rust
//! use bean_validator::prelude::*;
//!
//! struct Item {
//!     label: Option<String>,
//! }
//!
//! struct Order {
//!     id: Option<String>,
//!     item: Option<Item>,
//! }
//!
//! record_value!(Item);
//!
//! let item = RecordValidator::builder()
//!     .field(FieldValidator::named("label", |i: &Item| &i.label).is_not_empty())
//!     .build()
//!     .unwrap();
//!
//! let order = RecordValidator::builder()
//!     .field(
//!         FieldValidator::named("id", |o: &Order| &o.id)
//!             .is_not_null()
//!             .is_not_empty(),
//!     )
//!     .field(
//!         FieldValidator::named("item", |o: &Order| &o.item)
//!             .separator("/")
//!             .with_record_validator(item),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let report = order
//!     .validate_all(&Order {
//!         id: None,
//!         item: Some(Item { label: None }),
//!     })
//!     .unwrap();
//!
//! assert_eq!(report.paths().collect::<Vec<_>>(), ["id", "item/label"]);
//! assert_eq!(report.error_count(), 3);
//! ```
//!
//! ## Building Blocks
//!
//! - [`FieldValue`]: how a field value reads as null, container, or boolean
//! - [`Rule`]: a named predicate with a [`Polarity`]
//! - [`FieldValidator`]: rules and nested validators for one field
//! - [`RecordValidator`]: all field validators of one record type
//! - [`ValidationReport`]: path to errors mapping with separator-aware merging
//! - [`ValidatorConfig`] and [`NamingStrategy`]: build-time defaults

// Builders and reports carry boxed closures; spelling the types out is the point.
#![allow(clippy::type_complexity)]

pub mod config;
pub mod error;
pub mod field;
mod macros;
pub mod naming;
pub mod prelude;
pub mod record;
pub mod report;
pub mod rule;
pub mod value;

pub use config::ValidatorConfig;
pub use error::{ConfigError, EvaluationError, ValidationError};
pub use field::{FieldValidator, FieldValidatorBuilder, ValidateField};
pub use naming::{AccessorNameStrategy, NamingStrategy, SharedNamingStrategy};
pub use record::{RecordValidator, RecordValidatorBuilder};
pub use report::{DEFAULT_SEPARATOR, ErrorList, ValidationReport};
pub use rule::{Polarity, Rule, keys};
pub use value::{FieldValue, ValueShape};
