//! Field path naming strategies
//!
//! A field validator normally gets its path from the caller
//! ([`FieldValidatorBuilder::named`](crate::FieldValidatorBuilder::named)).
//! When it does not, a [`NamingStrategy`] may derive one from the accessor.
//! Strategies only ever see the accessor's type name; with no strategy, or
//! when the strategy has no answer, building the validator fails with
//! [`ConfigError::UnresolvedFieldPath`](crate::ConfigError::UnresolvedFieldPath)
//! instead of guessing.

use std::sync::Arc;

/// Derives a field path from an accessor's type name.
///
/// The type name is what [`std::any::type_name`] reports for the accessor:
/// `"shop::Order::get_items"` for a function item, something ending in
/// `{{closure}}` for a closure.
pub trait NamingStrategy: Send + Sync {
    /// Returns a field path, or `None` if this accessor cannot be named.
    fn field_name(&self, accessor: &str) -> Option<String>;
}

impl<F> NamingStrategy for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn field_name(&self, accessor: &str) -> Option<String> {
        self(accessor)
    }
}

/// Shared handle to a naming strategy.
pub type SharedNamingStrategy = Arc<dyn NamingStrategy>;

// ============================================================================
// ACCESSOR NAME STRATEGY
// ============================================================================

/// Names a field after the function used to read it.
///
/// Takes the last path segment of the accessor's type name and strips one
/// accessor prefix (`get_`, `is_`, `has_`):
///
/// | Accessor | Field path |
/// |---|---|
/// | `Order::get_items` | `items` |
/// | `Order::is_paid` | `paid` |
/// | `Order::customer` | `customer` |
/// | a closure | unresolved |
///
/// # Examples
///
/// ```rust
/// use bean_validator::{AccessorNameStrategy, NamingStrategy};
///
/// let strategy = AccessorNameStrategy;
/// assert_eq!(strategy.field_name("shop::Order::get_items").as_deref(), Some("items"));
/// assert_eq!(strategy.field_name("shop::main::{{closure}}"), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessorNameStrategy;

impl AccessorNameStrategy {
    const PREFIXES: [&'static str; 3] = ["get_", "is_", "has_"];
}

impl NamingStrategy for AccessorNameStrategy {
    fn field_name(&self, accessor: &str) -> Option<String> {
        // Generic accessors carry their arguments after `<`.
        let path = accessor.split('<').next().unwrap_or(accessor);
        let segment = path.rsplit("::").next().unwrap_or(path);

        if segment.is_empty() || segment.contains('{') {
            return None;
        }

        let name = Self::PREFIXES
            .iter()
            .find_map(|prefix| segment.strip_prefix(prefix))
            .filter(|rest| !rest.is_empty())
            .unwrap_or(segment);

        Some(name.to_owned())
    }
}
