#![allow(clippy::float_cmp)]

//! RGB Index - in-memory record store with typed secondary indexes.
//!
//! Records are appended to a store that owns them, and every declared field
//! gets a hash index from field value to the rows holding it. Queries return
//! borrowed views into the store.
//!
//! # Key Concepts
//!
//! - **Field selector**: a zero-sized marker naming one field of a record
//!   (`FooI` for `Foo::i`), generated by `#[derive(Fields)]`
//! - **Row id**: a record's position in insertion order, never reused
//! - **Index**: per-field map from value to the rows holding it, in insertion order
//! - **Index list**: the tuple of selectors a store is declared over
//!
//! # Access Patterns
//!
//! - `add(record)` - append and index, returns the `RowId`
//! - `get_by_value(field, &key)` - exact match, O(1) bucket lookup
//! - `get_by_predicate(field, pred)` - `pred` runs once per distinct value
//! - `get_all()` - every record in insertion order
//!
//! ```
//! use rgb_index::{Fields, IndexedStore};
//!
//! #[derive(Fields)]
//! struct Player {
//!     name: String,
//!     level: u32,
//!     online: bool,
//! }
//!
//! let mut players = IndexedStore::<Player, (PlayerLevel, PlayerOnline)>::new();
//! players.add(Player { name: "alex".into(), level: 3, online: true });
//! players.add(Player { name: "sam".into(), level: 7, online: false });
//!
//! let online = players.get_by_value(PlayerOnline, &true);
//! assert_eq!(online[0].name, "alex");
//!
//! let veterans = players.get_by_predicate(PlayerLevel, |level| *level >= 5);
//! assert_eq!(veterans[0].name, "sam");
//! ```
//!
//! Use [`DynIndexedStore`] when the indexed fields are only known at runtime.

mod dynamic;
mod error;
mod field;
mod index;
mod list;
mod row;
mod store;
mod value;

pub use dynamic::{DynIndexedStore, DynIndexedStoreBuilder};
pub use error::{IndexError, IndexResult};
pub use field::{Field, FieldInfo};
pub use index::{Bucket, Index, KeyOf};
pub use list::{At, IndexList, Selects};
pub use rgb_index_derive::Fields;
pub use row::RowId;
pub use store::IndexedStore;
pub use value::{FloatKey, IndexValue};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{DynIndexedStore, Field, Fields, IndexValue, IndexedStore, RowId};
}
