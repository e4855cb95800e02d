//! DynIndexedStore - record store with indexes declared at runtime.
//!
//! Indexes are registered through [`DynIndexedStoreBuilder`] and stored
//! type-erased, keyed by the selector's `TypeId`. Queries downcast back to
//! the concrete [`Index`] at the typed access point. A selector that was never
//! declared is reported as [`IndexError::NotIndexed`] instead of an empty
//! result.
//!
//! Prefer [`IndexedStore`](crate::IndexedStore) when the field list is known
//! at compile time; this store is for field lists assembled at runtime.

use std::{
    any::{Any, TypeId},
    borrow::Borrow,
    fmt,
    hash::Hash,
};

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;

use crate::{
    error::{IndexError, IndexResult},
    field::{Field, FieldInfo},
    index::{Index, KeyOf},
    row::RowId,
};

/// Type-erased view of an [`Index`] over some field of `T`.
trait ErasedIndex<T>: Any {
    fn insert(&mut self, record: &T, row: RowId);

    fn info(&self) -> FieldInfo;

    fn as_any(&self) -> &dyn Any;
}

impl<F: Field> ErasedIndex<F::Record> for Index<F> {
    fn insert(&mut self, record: &F::Record, row: RowId) {
        Index::insert(self, record, row);
    }

    fn info(&self) -> FieldInfo {
        FieldInfo::of::<F>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Builder that fixes the index list of a [`DynIndexedStore`].
pub struct DynIndexedStoreBuilder<T: 'static> {
    indexes: Vec<Box<dyn ErasedIndex<T>>>,
    slots: HashMap<TypeId, usize, FxBuildHasher>,
    capacity: usize,
}

impl<T: 'static> Default for DynIndexedStoreBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> DynIndexedStoreBuilder<T> {
    /// Create a builder with no indexes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            indexes: Vec::new(),
            slots: HashMap::with_hasher(FxBuildHasher),
            capacity: 0,
        }
    }

    /// Declare an index over `field`.
    ///
    /// Declaring the same field twice keeps the first index.
    #[must_use]
    pub fn index<F: Field<Record = T>>(mut self, _field: F) -> Self {
        let type_id = TypeId::of::<F>();

        if self.slots.contains_key(&type_id) {
            tracing::debug!(field = F::NAME, "index already declared");
            return self;
        }

        tracing::debug!(field = F::NAME, slot = self.indexes.len(), "declaring index");
        self.slots.insert(type_id, self.indexes.len());
        self.indexes.push(Box::new(Index::<F>::new()));
        self
    }

    /// Reserve room for `capacity` records.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Finish declaring indexes.
    #[must_use]
    pub fn build(self) -> DynIndexedStore<T> {
        tracing::debug!(
            record = std::any::type_name::<T>(),
            indexes = self.indexes.len(),
            capacity = self.capacity,
            "creating dynamic indexed store"
        );

        DynIndexedStore {
            rows: Vec::with_capacity(self.capacity),
            indexes: self.indexes,
            slots: self.slots,
        }
    }
}

/// Record store whose indexed fields are chosen at runtime.
///
/// # Example
///
/// ```
/// use rgb_index::{DynIndexedStore, Fields, IndexError};
///
/// #[derive(Fields)]
/// struct Foo {
///     i: i32,
///     c: char,
/// }
///
/// let mut store = DynIndexedStore::builder().index(FooI).build();
/// store.add(Foo { i: 1, c: 'a' });
///
/// assert_eq!(store.get_by_value(FooI, &1)?.len(), 1);
/// assert!(matches!(
///     store.get_by_value(FooC, &'a'),
///     Err(IndexError::NotIndexed { field: "c", .. })
/// ));
/// # Ok::<(), IndexError>(())
/// ```
pub struct DynIndexedStore<T: 'static> {
    /// Records in insertion order; position is the row id.
    rows: Vec<T>,
    /// Declared indexes, in declaration order.
    indexes: Vec<Box<dyn ErasedIndex<T>>>,
    /// Selector TypeId to position in `indexes`.
    slots: HashMap<TypeId, usize, FxBuildHasher>,
}

impl<T: 'static> DynIndexedStore<T> {
    /// Start declaring the indexes of a new store.
    #[must_use]
    pub fn builder() -> DynIndexedStoreBuilder<T> {
        DynIndexedStoreBuilder::new()
    }

    // ==================== Writes ====================

    /// Append a record and index it under every declared field.
    pub fn add(&mut self, record: T) -> RowId {
        let row = RowId::from_raw(self.rows.len());
        self.rows.push(record);

        let record = &self.rows[row.as_raw()];
        for index in &mut self.indexes {
            index.insert(record, row);
        }

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

    /// Check if `field` was declared as an index.
    #[must_use]
    pub fn is_indexed<F: Field<Record = T>>(&self, _field: F) -> bool {
        self.slots.contains_key(&TypeId::of::<F>())
    }

    /// Information about every declared index, in declaration order.
    pub fn indexed_fields(&self) -> impl Iterator<Item = FieldInfo> + '_ {
        self.indexes.iter().map(|index| index.info())
    }

    // ==================== Index Queries ====================

    /// Borrow the index over `field`.
    pub fn index<F: Field<Record = T>>(&self, _field: F) -> IndexResult<&Index<F>> {
        let slot = self
            .slots
            .get(&TypeId::of::<F>())
            .ok_or(IndexError::NotIndexed {
                field: F::NAME,
                record: std::any::type_name::<T>(),
            })?;

        self.indexes
            .get(*slot)
            .and_then(|index| index.as_any().downcast_ref::<Index<F>>())
            .ok_or(IndexError::TypeMismatch { field: F::NAME })
    }

    /// Records whose `field` equals `key`, in insertion order.
    pub fn get_by_value<F: Field<Record = T>>(
        &self,
        field: F,
        key: &F::Value,
    ) -> IndexResult<Vec<&T>> {
        let rows = self.rows_by_value(field, key)?;
        Ok(self.resolve(rows.iter().copied()))
    }

    /// Row ids whose `field` equals `key`, in insertion order.
    pub fn rows_by_value<F: Field<Record = T>>(
        &self,
        field: F,
        key: &F::Value,
    ) -> IndexResult<&[RowId]> {
        Ok(self.index(field)?.rows(key))
    }

    /// Records stored under index key `key`, which may be borrowed.
    ///
    /// Same lookup rules as
    /// [`IndexedStore::get_by_key`](crate::IndexedStore::get_by_key).
    pub fn get_by_key<F, Q>(&self, field: F, key: &Q) -> IndexResult<Vec<&T>>
    where
        F: Field<Record = T>,
        KeyOf<F>: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let rows = self.index(field)?.rows_by_key(key);
        Ok(self.resolve(rows.iter().copied()))
    }

    /// Records whose `field` satisfies `predicate`.
    ///
    /// Same evaluation rules as
    /// [`IndexedStore::get_by_predicate`](crate::IndexedStore::get_by_predicate).
    pub fn get_by_predicate<F, Pred>(&self, field: F, predicate: Pred) -> IndexResult<Vec<&T>>
    where
        F: Field<Record = T>,
        Pred: FnMut(&F::Value) -> bool,
    {
        let index = self.index(field)?;
        Ok(self.resolve(index.matching(&self.rows, predicate)))
    }

    /// Row ids whose `field` satisfies `predicate`.
    pub fn rows_by_predicate<F, Pred>(&self, field: F, predicate: Pred) -> IndexResult<Vec<RowId>>
    where
        F: Field<Record = T>,
        Pred: FnMut(&F::Value) -> bool,
    {
        let index = self.index(field)?;
        Ok(index.matching(&self.rows, predicate).collect())
    }

    /// Number of distinct values of `field`.
    pub fn distinct_values<F: Field<Record = T>>(&self, field: F) -> IndexResult<usize> {
        Ok(self.index(field)?.distinct())
    }

    fn resolve(&self, rows: impl Iterator<Item = RowId>) -> Vec<&T> {
        rows.filter_map(|row| self.rows.get(row.as_raw())).collect()
    }
}

impl<T: 'static> Extend<T> for DynIndexedStore<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, records: I) {
        let records = records.into_iter();
        self.rows.reserve(records.size_hint().0);
        for record in records {
            self.add(record);
        }
    }
}

impl<T: 'static> fmt::Debug for DynIndexedStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.indexed_fields().map(|info| info.name()).collect();
        f.debug_struct("DynIndexedStore")
            .field("rows", &self.rows.len())
            .field("fields", &fields)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::approx_constant)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Foo {
        i: i32,
        d: f64,
        c: char,
    }

    crate::field!(FooI => Foo, i: i32);
    crate::field!(FooD => Foo, d: f64);
    crate::field!(FooC => Foo, c: char);

    fn sample() -> DynIndexedStore<Foo> {
        let mut store = DynIndexedStore::builder().index(FooI).index(FooD).build();
        store.extend([
            Foo {
                i: 1,
                d: 3.14,
                c: 'a',
            },
            Foo {
                i: 2,
                d: 2.71,
                c: 'b',
            },
            Foo {
                i: 1,
                d: 2.71,
                c: 'c',
            },
        ]);
        store
    }

    #[test]
    fn test_dyn_get_by_value() {
        let store = sample();

        let chars: Vec<char> = store
            .get_by_value(FooI, &1)
            .unwrap()
            .into_iter()
            .map(|foo| foo.c)
            .collect();

        assert_eq!(chars, vec!['a', 'c']);
    }

    #[test]
    fn test_dyn_get_by_predicate() {
        let store = sample();

        let mut chars: Vec<char> = store
            .get_by_predicate(FooD, |d| *d > 2.7)
            .unwrap()
            .into_iter()
            .map(|foo| foo.c)
            .collect();
        chars.sort_unstable();

        assert_eq!(chars, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_dyn_undeclared_field() {
        let store = sample();

        assert!(!store.is_indexed(FooC));
        assert_eq!(
            store.get_by_value(FooC, &'a').unwrap_err(),
            IndexError::NotIndexed {
                field: "c",
                record: std::any::type_name::<Foo>(),
            }
        );
        assert!(store.get_by_predicate(FooC, |_| true).is_err());
        assert!(store.distinct_values(FooC).is_err());
    }

    #[test]
    fn test_dyn_duplicate_declaration() {
        let store = DynIndexedStore::<Foo>::builder()
            .index(FooI)
            .index(FooI)
            .build();

        assert_eq!(store.indexed_fields().count(), 1);
    }

    #[test]
    fn test_dyn_miss_and_empty() {
        let store = DynIndexedStore::<Foo>::builder().index(FooI).build();

        assert!(store.is_empty());
        assert!(store.get_all().is_empty());
        assert!(store.get_by_value(FooI, &1).unwrap().is_empty());
        assert_eq!(store.distinct_values(FooI).unwrap(), 0);
    }

    #[test]
    fn test_dyn_field_info() {
        let store = sample();

        let names: Vec<&str> = store.indexed_fields().map(|info| info.name()).collect();
        assert_eq!(names, vec!["i", "d"]);
        assert_eq!(format!("{store:?}"), r#"DynIndexedStore { rows: 3, fields: ["i", "d"] }"#);
    }

    #[test]
    #[allow(invalid_nan_comparisons)]
    fn test_dyn_nan_lookup_agrees_with_predicate() {
        let mut store = sample();
        store.add(Foo {
            i: 3,
            d: f64::NAN,
            c: 'n',
        });

        assert!(store.get_by_value(FooD, &f64::NAN).unwrap().is_empty());
        assert!(
            store
                .rows_by_predicate(FooD, |d| *d == f64::NAN)
                .unwrap()
                .is_empty()
        );
        assert_eq!(store.distinct_values(FooD).unwrap(), 3);
    }

    #[test]
    fn test_dyn_get_by_key() {
        let store = sample();

        let chars: Vec<char> = store
            .get_by_key(FooI, &1_i32)
            .unwrap()
            .into_iter()
            .map(|foo| foo.c)
            .collect();

        assert_eq!(chars, vec!['a', 'c']);
        assert!(store.get_by_key(FooC, &'a').is_err());
    }

    #[test]
    fn test_dyn_rows() {
        let store = sample();

        assert_eq!(
            store.rows_by_value(FooD, &2.71).unwrap(),
            &[RowId::from_raw(1), RowId::from_raw(2)]
        );
        assert_eq!(store.get(RowId::from_raw(0)).map(|foo| foo.c), Some('a'));
        assert_eq!(store.len(), 3);
    }
}
