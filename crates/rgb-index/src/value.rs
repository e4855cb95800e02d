//! Values that can key an index.
//!
//! An index is a hash map, so every indexed field needs a key that is
//! `Eq + Hash`. Most value types are their own key. Floats are not `Eq`, so
//! they are keyed by a normalized bit pattern instead.

use std::{fmt, hash::Hash};

/// A field value that can be stored in an index.
///
/// # Example
///
/// ```
/// use rgb_index::{IndexValue, index_value};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Kind {
///     Player,
///     Mob,
/// }
///
/// index_value!(Kind);
///
/// assert_eq!(Kind::Mob.index_key(), Kind::Mob);
/// ```
pub trait IndexValue: 'static {
    /// Hashable key the value is bucketed under.
    type Key: Eq + Hash + 'static;

    /// Compute the key for this value.
    ///
    /// Two values must produce equal keys exactly when they compare equal,
    /// except that float NaNs all share one key.
    fn index_key(&self) -> Self::Key;

    /// Check if the value compares equal to itself.
    ///
    /// False only for values holding a NaN. Exact lookups for such a value
    /// match nothing, the same as an `==` predicate would.
    fn is_reflexive(&self) -> bool {
        true
    }
}

/// Implement [`IndexValue`] for types that are their own key.
///
/// The types must be `Clone + Eq + Hash + 'static`.
#[macro_export]
macro_rules! index_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::IndexValue for $ty {
                type Key = $ty;

                fn index_key(&self) -> Self::Key {
                    ::core::clone::Clone::clone(self)
                }
            }
        )+
    };
}

index_value!(
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    bool,
    char,
    (),
    String,
    &'static str,
);

/// Hashable key for a float value.
///
/// `-0.0` and `0.0` share a key, as do all NaN payloads. `f32` values are
/// widened to `f64` first, which is lossless.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloatKey(u64);

impl FloatKey {
    /// Key for an `f64`.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            Self(f64::NAN.to_bits())
        } else if value == 0.0 {
            Self(0.0_f64.to_bits())
        } else {
            Self(value.to_bits())
        }
    }

    /// Key for an `f32`.
    #[must_use]
    pub fn from_f32(value: f32) -> Self {
        Self::from_f64(f64::from(value))
    }

    /// The normalized value this key stands for.
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl fmt::Debug for FloatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FloatKey({})", self.value())
    }
}

impl IndexValue for f64 {
    type Key = FloatKey;

    fn index_key(&self) -> FloatKey {
        FloatKey::from_f64(*self)
    }

    fn is_reflexive(&self) -> bool {
        !self.is_nan()
    }
}

impl IndexValue for f32 {
    type Key = FloatKey;

    fn index_key(&self) -> FloatKey {
        FloatKey::from_f32(*self)
    }

    fn is_reflexive(&self) -> bool {
        !self.is_nan()
    }
}

impl<V: IndexValue> IndexValue for Option<V> {
    type Key = Option<V::Key>;

    fn index_key(&self) -> Self::Key {
        self.as_ref().map(IndexValue::index_key)
    }

    fn is_reflexive(&self) -> bool {
        self.as_ref().is_none_or(IndexValue::is_reflexive)
    }
}

macro_rules! impl_tuple_value {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: IndexValue),+> IndexValue for ($($name,)+) {
            type Key = ($($name::Key,)+);

            fn index_key(&self) -> Self::Key {
                ($(self.$idx.index_key(),)+)
            }

            fn is_reflexive(&self) -> bool {
                $(self.$idx.is_reflexive())&&+
            }
        }
    };
}

impl_tuple_value!(A 0, B 1);
impl_tuple_value!(A 0, B 1, C 2);
impl_tuple_value!(A 0, B 1, C 2, D 3);
