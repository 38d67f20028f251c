//! Macros for wiring record types into the field value model.
//!
//! # Available Macros
//!
//! - [`record_value!`]: mark a record type as a present, non-container value
//!   so it can sit behind a field validator and carry nested validators

// ============================================================================
// RECORD VALUE MACRO
// ============================================================================

/// Implements [`FieldValue`](crate::FieldValue) for record types.
///
/// A record is always present and has the shape
/// [`ValueShape::Object`](crate::ValueShape::Object): `is_null`/`is_not_null`
/// treat it as a value, the emptiness rules never fire on it, and
/// `is_true()`/`is_false()` let it pass. Wrap it in `Option` for a nullable
/// field.
///
/// # Variants
///
/// **Plain types**:
/// ```rust
/// use bean_validator::record_value;
///
/// struct Address { zip: Option<String> }
/// struct Customer { address: Option<Address> }
///
/// record_value!(Address, Customer);
/// ```
///
/// **Generic types**:
/// ```rust
/// use bean_validator::record_value;
///
/// struct Page<T> { items: Vec<T> }
///
/// record_value!(impl<T> for Page<T>);
/// ```
#[macro_export]
macro_rules! record_value {
    // ── Variant 1: generic record ────────────────────────────────────────
    (impl<$($gen:ident),+ $(,)?> for $ty:ty) => {
        impl<$($gen),+> $crate::FieldValue for $ty {
            type Inner = Self;

            #[inline]
            fn present(&self) -> ::core::option::Option<&Self> {
                ::core::option::Option::Some(self)
            }

            #[inline]
            fn shape(&self) -> $crate::ValueShape {
                $crate::ValueShape::Object
            }
        }
    };

    // ── Variant 2: one or more plain records ─────────────────────────────
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::FieldValue for $ty {
            type Inner = Self;

            #[inline]
            fn present(&self) -> ::core::option::Option<&Self> {
                ::core::option::Option::Some(self)
            }

            #[inline]
            fn shape(&self) -> $crate::ValueShape {
                $crate::ValueShape::Object
            }
        }
    )+};
}
