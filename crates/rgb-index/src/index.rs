//! Per-field hash indexes.
//!
//! An [`Index`] maps each distinct value of one field to the bucket of row
//! ids holding that value. Buckets are filled in insertion order and never
//! shrink, so the row ids in a bucket are strictly increasing.

use std::{borrow::Borrow, fmt, hash::Hash, marker::PhantomData};

use hashbrown::{HashMap, hash_map::Entry};
use rustc_hash::FxBuildHasher;
use smallvec::{SmallVec, smallvec};

use crate::{field::Field, row::RowId, value::IndexValue};

/// Row ids sharing one field value, in insertion order.
pub type Bucket = SmallVec<[RowId; 4]>;

/// Key type of the index over `F`.
pub type KeyOf<F> = <<F as Field>::Value as IndexValue>::Key;

/// Hash index over a single field.
pub struct Index<F: Field> {
    /// Bucket per distinct key. Every bucket holds at least one row.
    buckets: HashMap<KeyOf<F>, Bucket, FxBuildHasher>,
    /// Total number of row ids across all buckets.
    rows: usize,
    marker: PhantomData<F>,
}

impl<F: Field> Default for Index<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field> Index<F> {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: HashMap::with_hasher(FxBuildHasher),
            rows: 0,
            marker: PhantomData,
        }
    }

    /// Record that `row` holds `record`'s value of this field.
    ///
    /// Rows must be inserted in increasing order.
    pub fn insert(&mut self, record: &F::Record, row: RowId) {
        match self.buckets.entry(F::key(record)) {
            Entry::Occupied(mut bucket) => {
                debug_assert!(
                    bucket.get().last().is_none_or(|&last| last < row),
                    "rows must be indexed in insertion order"
                );
                bucket.get_mut().push(row);
            }
            Entry::Vacant(slot) => {
                tracing::trace!(field = F::NAME, %row, "new bucket");
                slot.insert(smallvec![row]);
            }
        }
        self.rows += 1;
    }

    /// Rows whose field equals `value`, in insertion order.
    ///
    /// A value that is not equal to itself (NaN) matches no row.
    #[must_use]
    pub fn rows(&self, value: &F::Value) -> &[RowId] {
        if !value.is_reflexive() {
            return &[];
        }
        self.rows_by_key(&value.index_key())
    }

    /// Rows stored under `key`, in insertion order.
    ///
    /// Accepts any borrowed form of the key, so a `String` field can be
    /// looked up with a `&str`.
    #[must_use]
    pub fn rows_by_key<Q>(&self, key: &Q) -> &[RowId]
    where
        KeyOf<F>: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets
            .get(key)
            .map(|bucket| bucket.as_slice())
            .unwrap_or_default()
    }

    /// Check if any row holds `value`.
    #[must_use]
    pub fn contains(&self, value: &F::Value) -> bool {
        value.is_reflexive() && self.buckets.contains_key(&value.index_key())
    }

    /// Number of distinct values.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.buckets.len()
    }

    /// Number of indexed rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows
    }

    /// Check if no row has been indexed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Iterate over all buckets. Order across buckets is unspecified.
    pub fn buckets(&self) -> impl Iterator<Item = &[RowId]> {
        self.buckets.values().map(|bucket| bucket.as_slice())
    }

    /// Iterate over the distinct values present in the index.
    ///
    /// A bucket stores no value of its own, so each value is read back from
    /// the first record in its bucket. `records` must be the backing store
    /// this index was built over.
    pub(crate) fn values<'a>(
        &'a self,
        records: &'a [F::Record],
    ) -> impl Iterator<Item = &'a F::Value> {
        self.buckets
            .values()
            .filter_map(move |bucket| first_record(bucket, records))
            .map(F::get)
    }

    /// Rows of every bucket whose value satisfies `predicate`.
    ///
    /// `predicate` runs once per distinct value. Rows keep insertion order
    /// within a bucket; order across buckets is unspecified.
    pub(crate) fn matching<'a, P>(
        &'a self,
        records: &'a [F::Record],
        mut predicate: P,
    ) -> impl Iterator<Item = RowId> + 'a
    where
        P: FnMut(&F::Value) -> bool + 'a,
    {
        self.buckets
            .values()
            .filter(move |bucket| {
                first_record(bucket, records).is_some_and(|record| predicate(F::get(record)))
            })
            .flat_map(|bucket| bucket.iter().copied())
    }
}

/// The record holding the first row of `bucket`.
fn first_record<'a, R>(bucket: &Bucket, records: &'a [R]) -> Option<&'a R> {
    let record = bucket.first().and_then(|row| records.get(row.as_raw()));
    debug_assert!(
        record.is_some(),
        "index refers to a row outside its backing records"
    );
    record
}

impl<F: Field> fmt::Debug for Index<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("field", &F::NAME)
            .field("distinct", &self.buckets.len())
            .field("rows", &self.rows)
            .finish()
    }
}
