//! Field value model
//!
//! Rules look at a field through [`FieldValue`], which answers two
//! questions: is there a value at all ([`FieldValue::present`]) and what does it
//! look like ([`FieldValue::shape`]).
//!
//! | Type | Shape |
//! |---|---|
//! | `Option<T>` | `None` is [`ValueShape::Null`], `Some(t)` is the shape of `t` |
//! | `String`, `str`, `Cow<str>` | [`ValueShape::Container`] with the byte length |
//! | `Vec`, `VecDeque`, `[T]`, `[T; N]` | [`ValueShape::Container`] |
//! | `HashMap`, `BTreeMap`, `IndexMap`, sets | [`ValueShape::Container`] |
//! | `bool` | [`ValueShape::Bool`] |
//! | numbers, `char`, records | [`ValueShape::Object`] |
//! | `serde_json::Value` | by variant, `Number` is [`ValueShape::Object`] |
//!
//! Record types used as nested values opt in with
//! [`record_value!`](crate::record_value), which marks them as
//! [`ValueShape::Object`].

use indexmap::{IndexMap, IndexSet};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

// ============================================================================
// VALUE SHAPE
// ============================================================================

/// What a field value looks like to the built-in rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShape {
    /// No value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A string, sequence, mapping or array with the given length.
    Container(usize),
    /// Any other present value: numbers, characters, records.
    Object,
}

impl ValueShape {
    /// Returns `true` for [`ValueShape::Null`].
    pub const fn is_null(self) -> bool {
        matches!(self, Self::Null)
    }

    /// `Some(true)` for a zero-length container, `Some(false)` for a non-empty
    /// one, `None` when emptiness does not apply (null, booleans, objects).
    pub const fn container_is_empty(self) -> Option<bool> {
        match self {
            Self::Container(len) => Some(len == 0),
            _ => None,
        }
    }
}

// ============================================================================
// FIELD VALUE
// ============================================================================

/// A value that rules can inspect.
///
/// `Inner` is the type seen once the value is known to be present: for
/// `Option<Vec<String>>` it is `Vec<String>`, for plain types it is the type
/// itself. Predicate rules and nested record validators receive `&Inner`.
pub trait FieldValue {
    /// The present value behind any nullable wrapper.
    type Inner: ?Sized;

    /// The present value, or `None` when the field is null.
    fn present(&self) -> Option<&Self::Inner>;

    /// How the value looks to the built-in rules.
    fn shape(&self) -> ValueShape;
}

impl<T: FieldValue> FieldValue for Option<T> {
    type Inner = T::Inner;

    #[inline]
    fn present(&self) -> Option<&Self::Inner> {
        self.as_ref().and_then(FieldValue::present)
    }

    #[inline]
    fn shape(&self) -> ValueShape {
        self.as_ref().map_or(ValueShape::Null, FieldValue::shape)
    }
}

macro_rules! delegate_pointer {
    ($($ptr:ident),*) => {$(
        impl<T: FieldValue + ?Sized> FieldValue for $ptr<T> {
            type Inner = T::Inner;

            #[inline]
            fn present(&self) -> Option<&Self::Inner> {
                (**self).present()
            }

            #[inline]
            fn shape(&self) -> ValueShape {
                (**self).shape()
            }
        }
    )*};
}

delegate_pointer!(Box, Arc, Rc);

impl<T: FieldValue + ?Sized> FieldValue for &T {
    type Inner = T::Inner;

    #[inline]
    fn present(&self) -> Option<&Self::Inner> {
        (**self).present()
    }

    #[inline]
    fn shape(&self) -> ValueShape {
        (**self).shape()
    }
}

/// Implements [`FieldValue`] for always-present values of a fixed shape.
macro_rules! present_value {
    (|$v:ident| $shape:expr => $($ty:ty),* $(,)?) => {$(
        impl FieldValue for $ty {
            type Inner = Self;

            #[inline]
            fn present(&self) -> Option<&Self> {
                Some(self)
            }

            #[inline]
            fn shape(&self) -> ValueShape {
                let $v = self;
                $shape
            }
        }
    )*};
}

present_value!(|_value| ValueShape::Object =>
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64, char, (),
);

present_value!(|value| ValueShape::Bool(*value) => bool);

present_value!(|value| ValueShape::Container(value.len()) => String, str);

impl FieldValue for Cow<'_, str> {
    type Inner = Self;

    #[inline]
    fn present(&self) -> Option<&Self> {
        Some(self)
    }

    #[inline]
    fn shape(&self) -> ValueShape {
        ValueShape::Container(self.len())
    }
}

macro_rules! container_value {
    ($(impl<$($gen:ident),*> for $ty:ty;)*) => {$(
        impl<$($gen),*> FieldValue for $ty {
            type Inner = Self;

            #[inline]
            fn present(&self) -> Option<&Self> {
                Some(self)
            }

            #[inline]
            fn shape(&self) -> ValueShape {
                ValueShape::Container(self.len())
            }
        }
    )*};
}

container_value! {
    impl<T> for Vec<T>;
    impl<T> for VecDeque<T>;
    impl<T> for LinkedList<T>;
    impl<T> for [T];
    impl<T> for BTreeSet<T>;
    impl<K, V> for BTreeMap<K, V>;
    impl<T, S> for HashSet<T, S>;
    impl<K, V, S> for HashMap<K, V, S>;
    impl<T, S> for IndexSet<T, S>;
    impl<K, V, S> for IndexMap<K, V, S>;
}

impl<T, const N: usize> FieldValue for [T; N] {
    type Inner = Self;

    #[inline]
    fn present(&self) -> Option<&Self> {
        Some(self)
    }

    #[inline]
    fn shape(&self) -> ValueShape {
        ValueShape::Container(N)
    }
}

impl FieldValue for serde_json::Value {
    type Inner = Self;

    fn present(&self) -> Option<&Self> {
        if self.is_null() { None } else { Some(self) }
    }

    fn shape(&self) -> ValueShape {
        use serde_json::Value;

        match self {
            Value::Null => ValueShape::Null,
            Value::Bool(b) => ValueShape::Bool(*b),
            Value::String(s) => ValueShape::Container(s.len()),
            Value::Array(items) => ValueShape::Container(items.len()),
            Value::Object(map) => ValueShape::Container(map.len()),
            Value::Number(_) => ValueShape::Object,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
