//! Type-level list of indexed fields.
//!
//! A store is declared over a tuple of field selectors such as
//! `(FooI, FooD)`. The tuple fixes which indexes exist, and each query
//! resolves its selector to a tuple position at compile time through
//! [`Selects`]. Asking for a selector that is not in the tuple is a type
//! error, not an empty result.
//!
//! Tuples of one to eight selectors are supported.

use crate::{field::Field, index::Index, row::RowId};

/// A fixed list of field selectors over one record type.
pub trait IndexList: 'static {
    /// The record type every selector in the list reads from.
    type Record: 'static;

    /// One [`Index`] per selector, in declaration order.
    type Indexes: Default;

    /// Names of the declared fields, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Insert `row` into every index.
    fn insert(indexes: &mut Self::Indexes, record: &Self::Record, row: RowId);
}

/// Position of a selector within an [`IndexList`].
///
/// Only used as an inferred type parameter; callers never name it.
#[derive(Clone, Copy, Debug, Default)]
pub struct At<const N: usize>;

/// Proof that the list contains selector `F` at position `P`.
pub trait Selects<F: Field, P>: IndexList<Record = F::Record> {
    /// Borrow the index for `F`.
    fn index(indexes: &Self::Indexes) -> &Index<F>;
}

macro_rules! impl_index_list {
    ($first:ident $($name:ident)* ; $($idx:tt)+) => {
        impl<$first: Field $(, $name: Field<Record = $first::Record>)*> IndexList
            for ($first, $($name,)*)
        {
            type Record = $first::Record;
            type Indexes = (Index<$first>, $(Index<$name>,)*);

            const FIELDS: &'static [&'static str] = &[$first::NAME $(, $name::NAME)*];

            fn insert(indexes: &mut Self::Indexes, record: &Self::Record, row: RowId) {
                $(indexes.$idx.insert(record, row);)+
            }
        }

        impl_selects!([$first $($name)*]; $first $($name)*; $($idx)+);
    };
}

/// Emits one `Selects` impl per tuple position. Recurses so the full
/// parameter list can be repeated inside every impl.
macro_rules! impl_selects {
    ([$($all:ident)+]; ; ) => {};
    ([$first:ident $($all:ident)*]; $sel:ident $($rest:ident)*; $idx:tt $($rest_idx:tt)*) => {
        impl<$first: Field $(, $all: Field<Record = $first::Record>)*> Selects<$sel, At<$idx>>
            for ($first, $($all,)*)
        {
            fn index(indexes: &Self::Indexes) -> &Index<$sel> {
                &indexes.$idx
            }
        }

        impl_selects!([$first $($all)*]; $($rest)*; $($rest_idx)*);
    };
}

impl_index_list!(A; 0);
impl_index_list!(A B; 0 1);
impl_index_list!(A B C; 0 1 2);
impl_index_list!(A B C D; 0 1 2 3);
impl_index_list!(A B C D E; 0 1 2 3 4);
impl_index_list!(A B C D E F; 0 1 2 3 4 5);
impl_index_list!(A B C D E F G; 0 1 2 3 4 5 6);
impl_index_list!(A B C D E F G H; 0 1 2 3 4 5 6 7);
