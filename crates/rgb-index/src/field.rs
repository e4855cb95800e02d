//! Field selectors.
//!
//! A field selector is a zero-sized marker type naming one field of a record
//! type. Stores are declared over a list of selectors, and the same marker
//! value is passed back into queries to pick the index to read.
//!
//! Selectors are usually generated with `#[derive(Fields)]`, or written by
//! hand with [`field!`](crate::field!).

use std::{any::TypeId, fmt};

use crate::value::IndexValue;

/// A selector for one field of a record type.
///
/// # Example
///
/// ```
/// use rgb_index::Field;
///
/// struct Foo {
///     i: i32,
/// }
///
/// #[derive(Clone, Copy, Debug)]
/// struct FooI;
///
/// impl Field for FooI {
///     type Record = Foo;
///     type Value = i32;
///     const NAME: &'static str = "i";
///
///     fn get(record: &Foo) -> &i32 {
///         &record.i
///     }
/// }
///
/// assert_eq!(*FooI::get(&Foo { i: 7 }), 7);
/// ```
pub trait Field: Copy + 'static {
    /// The record type this field belongs to.
    type Record: 'static;

    /// The type stored in the field.
    type Value: IndexValue;

    /// Field name, used in diagnostics.
    const NAME: &'static str;

    /// Borrow the field out of a record.
    fn get(record: &Self::Record) -> &Self::Value;

    /// Index key of the field in a record.
    fn key(record: &Self::Record) -> <Self::Value as IndexValue>::Key {
        Self::get(record).index_key()
    }
}

/// Runtime information about a field selector.
#[derive(Clone, Copy)]
pub struct FieldInfo {
    /// Field name.
    name: &'static str,
    /// Record type name for debugging.
    record: &'static str,
    /// Value type name for debugging.
    value: &'static str,
    /// Rust TypeId of the selector.
    type_id: TypeId,
}

impl FieldInfo {
    /// Create field info for a selector.
    #[must_use]
    pub fn of<F: Field>() -> Self {
        Self {
            name: F::NAME,
            record: std::any::type_name::<F::Record>(),
            value: std::any::type_name::<F::Value>(),
            type_id: TypeId::of::<F>(),
        }
    }

    /// Get the field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Get the record type name.
    #[must_use]
    pub const fn record(&self) -> &'static str {
        self.record
    }

    /// Get the value type name.
    #[must_use]
    pub const fn value(&self) -> &'static str {
        self.value
    }

    /// Get the selector's TypeId.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Check if this info is for the given selector.
    #[must_use]
    pub fn is<F: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<F>()
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("record", &self.record)
            .field("value", &self.value)
            .finish()
    }
}

/// Declare a field selector by hand.
///
/// ```
/// use rgb_index::{Field, field};
///
/// pub struct Foo {
///     pub i: i32,
///     pub s: String,
/// }
///
/// field!(pub FooI => Foo, i: i32);
/// field!(
///     /// Selects `Foo::s`.
///     pub FooS => Foo, s: String
/// );
///
/// assert_eq!(FooS::NAME, "s");
/// ```
#[macro_export]
macro_rules! field {
    ($(#[$meta:meta])* $vis:vis $name:ident => $record:ty, $field:ident : $value:ty) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::Field for $name {
            type Record = $record;
            type Value = $value;
            const NAME: &'static str = stringify!($field);

            fn get(record: &$record) -> &$value {
                &record.$field
            }
        }
    };
}
