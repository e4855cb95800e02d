//! IndexedStore - append-only record storage with typed secondary indexes.
//!
//! The store owns every record in a `Vec` indexed by [`RowId`] and keeps one
//! [`Index`] per declared field. The declared fields are the tuple `L`, so
//! the set of indexes is fixed for the lifetime of the store and checked at
//! compile time.
//!
//! # Example
//!
//! ```
//! use rgb_index::{Fields, IndexedStore};
//!
//! #[derive(Fields)]
//! struct Foo {
//!     i: i32,
//!     d: f64,
//!     c: char,
//!     s: String,
//! }
//!
//! let mut store = IndexedStore::<Foo, (FooI, FooD)>::new();
//! store.add(Foo { i: 1, d: 3.25, c: 'a', s: "Hello".into() });
//! store.add(Foo { i: 2, d: 2.75, c: 'b', s: "World".into() });
//! store.add(Foo { i: 1, d: 2.75, c: 'c', s: "Foo".into() });
//!
//! let ones = store.get_by_value(FooI, &1);
//! assert_eq!(ones.len(), 2);
//! assert_eq!(ones[0].s, "Hello");
//! assert_eq!(ones[1].s, "Foo");
//!
//! let above = store.get_by_predicate(FooD, |d| *d > 2.0);
//! assert_eq!(above.len(), 3);
//! ```
//!
//! Querying a field that was not declared does not compile:
//!
//! ```compile_fail
//! use rgb_index::{Fields, IndexedStore};
//!
//! #[derive(Fields)]
//! struct Foo {
//!     i: i32,
//!     c: char,
//! }
//!
//! let store = IndexedStore::<Foo, (FooI,)>::new();
//! store.get_by_value(FooC, &'c');
//! ```
//!
//! Neither does passing a key of the wrong type:
//!
//! ```compile_fail
//! use rgb_index::{Fields, IndexedStore};
//!
//! #[derive(Fields)]
//! struct Foo {
//!     i: i32,
//! }
//!
//! let store = IndexedStore::<Foo, (FooI,)>::new();
//! store.get_by_value(FooI, &"one");
//! ```

use std::{borrow::Borrow, fmt, hash::Hash};

use crate::{
    field::Field,
    index::{Index, KeyOf},
    list::{IndexList, Selects},
    row::RowId,
};

/// Record store indexed on the fields listed in `L`.
pub struct IndexedStore<T, L: IndexList<Record = T>> {
    /// Records in insertion order; position is the row id.
    rows: Vec<T>,
    /// One index per field in `L`.
    indexes: L::Indexes,
}

impl<T: 'static, L: IndexList<Record = T>> Default for IndexedStore<T, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static, L: IndexList<Record = T>> IndexedStore<T, L> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty store with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        tracing::debug!(
            record = std::any::type_name::<T>(),
            fields = ?L::FIELDS,
            capacity,
            "creating indexed store"
        );

        Self {
            rows: Vec::with_capacity(capacity),
            indexes: L::Indexes::default(),
        }
    }

    // ==================== Writes ====================

    /// Append a record and index it under every declared field.
    ///
    /// Returns the row id assigned to the record.
    pub fn add(&mut self, record: T) -> RowId {
        let row = RowId::from_raw(self.rows.len());
        self.rows.push(record);
        L::insert(&mut self.indexes, &self.rows[row.as_raw()], row);

        tracing::trace!(%row, "added record");
        row
    }

    // ==================== Row Access ====================

    /// Get the record at `row`.
    #[must_use]
    pub fn get(&self, row: RowId) -> Option<&T> {
        self.rows.get(row.as_raw())
    }

    /// All records in insertion order.
    #[must_use]
    pub fn get_all(&self) -> &[T] {
        &self.rows
    }

    /// Iterate over all records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Names of the indexed fields, in declaration order.
    #[must_use]
    pub fn indexed_fields(&self) -> &'static [&'static str] {
        L::FIELDS
    }

    // ==================== Index Queries ====================

    /// Borrow the index over `field`.
    #[must_use]
    pub fn index<F, P>(&self, _field: F) -> &Index<F>
    where
        F: Field<Record = T>,
        L: Selects<F, P>,
    {
        L::index(&self.indexes)
    }

    /// Records whose `field` equals `key`, in insertion order.
    ///
    /// Returns an empty vec if no record holds `key`. A key that is not
    /// equal to itself (NaN) matches nothing.
    #[must_use]
    pub fn get_by_value<F, P>(&self, field: F, key: &F::Value) -> Vec<&T>
    where
        F: Field<Record = T>,
        L: Selects<F, P>,
    {
        self.resolve(self.rows_by_value(field, key).iter().copied())
    }

    /// Row ids whose `field` equals `key`, in insertion order.
    #[must_use]
    pub fn rows_by_value<F, P>(&self, field: F, key: &F::Value) -> &[RowId]
    where
        F: Field<Record = T>,
        L: Selects<F, P>,
    {
        self.index(field).rows(key)
    }

    /// Records stored under index key `key`, in insertion order.
    ///
    /// The key may be any borrowed form of the field's index key, so a
    /// `String` field can be queried with a `&str`. Float fields are keyed
    /// by [`FloatKey`](crate::FloatKey); use [`get_by_value`](Self::get_by_value)
    /// for those.
    #[must_use]
    pub fn get_by_key<F, P, Q>(&self, field: F, key: &Q) -> Vec<&T>
    where
        F: Field<Record = T>,
        L: Selects<F, P>,
        KeyOf<F>: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.resolve(self.rows_by_key(field, key).iter().copied())
    }

    /// Row ids stored under index key `key`, in insertion order.
    #[must_use]
    pub fn rows_by_key<F, P, Q>(&self, field: F, key: &Q) -> &[RowId]
    where
        F: Field<Record = T>,
        L: Selects<F, P>,
        KeyOf<F>: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index(field).rows_by_key(key)
    }

    /// Number of records whose `field` equals `key`.
    #[must_use]
    pub fn count_by_value<F, P>(&self, field: F, key: &F::Value) -> usize
    where
        F: Field<Record = T>,
        L: Selects<F, P>,
    {
        self.rows_by_value(field, key).len()
    }

    /// Records whose `field` satisfies `predicate`.
    ///
    /// `predicate` is evaluated once per distinct value present in the index.
    /// Records sharing a value keep insertion order; the order across values
    /// is unspecified.
    pub fn get_by_predicate<F, P, Pred>(&self, field: F, predicate: Pred) -> Vec<&T>
    where
        F: Field<Record = T>,
        L: Selects<F, P>,
        Pred: FnMut(&F::Value) -> bool,
    {
        self.resolve(self.index(field).matching(&self.rows, predicate))
    }

    /// Row ids whose `field` satisfies `predicate`.
    pub fn rows_by_predicate<F, P, Pred>(&self, field: F, predicate: Pred) -> Vec<RowId>
    where
        F: Field<Record = T>,
        L: Selects<F, P>,
        Pred: FnMut(&F::Value) -> bool,
    {
        self.index(field).matching(&self.rows, predicate).collect()
    }

    /// Number of distinct values of `field`.
    #[must_use]
    pub fn distinct_values<F, P>(&self, field: F) -> usize
    where
        F: Field<Record = T>,
        L: Selects<F, P>,
    {
        self.index(field).distinct()
    }

    /// Iterate over the distinct values of `field`, in unspecified order.
    pub fn values<F, P>(&self, field: F) -> impl Iterator<Item = &F::Value>
    where
        F: Field<Record = T>,
        L: Selects<F, P>,
    {
        self.index(field).values(&self.rows)
    }

    fn resolve(&self, rows: impl Iterator<Item = RowId>) -> Vec<&T> {
        rows.filter_map(|row| self.rows.get(row.as_raw())).collect()
    }
}

impl<T: 'static, L: IndexList<Record = T>> Extend<T> for IndexedStore<T, L> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, records: I) {
        let records = records.into_iter();
        self.rows.reserve(records.size_hint().0);
        for record in records {
            self.add(record);
        }
    }
}

impl<T: 'static, L: IndexList<Record = T>> FromIterator<T> for IndexedStore<T, L> {
    fn from_iter<I: IntoIterator<Item = T>>(records: I) -> Self {
        let mut store = Self::new();
        store.extend(records);
        store
    }
}

impl<'s, T: 'static, L: IndexList<Record = T>> IntoIterator for &'s IndexedStore<T, L> {
    type Item = &'s T;
    type IntoIter = std::slice::Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl<T: 'static, L: IndexList<Record = T>> fmt::Debug for IndexedStore<T, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedStore")
            .field("rows", &self.rows.len())
            .field("fields", &L::FIELDS)
            .finish()
    }
}
