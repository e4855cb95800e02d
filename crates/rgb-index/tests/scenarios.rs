//! End-to-end store scenarios using derived field selectors.
//!
//! Run with `RUST_LOG=rgb_index=trace` to see index activity.

#![allow(clippy::approx_constant)]

use rgb_index::{DynIndexedStore, Fields, IndexError, IndexedStore, RowId};

#[derive(Debug, Clone, PartialEq, Fields)]
struct Foo {
    i: i32,
    d: f64,
    c: char,
    s: String,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn foo(i: i32, d: f64, c: char, s: &str) -> Foo {
    Foo {
        i,
        d,
        c,
        s: s.to_string(),
    }
}

fn records() -> [Foo; 3] {
    [
        foo(1, 3.14, 'a', "Hello"),
        foo(2, 2.71, 'b', "World"),
        foo(1, 2.71, 'c', "Foo"),
    ]
}

#[test]
fn test_exact_and_predicate_scenario() {
    init_tracing();

    let mut store = IndexedStore::<Foo, (FooI, FooD)>::new();
    for record in records() {
        store.add(record);
    }

    let ones = store.get_by_value(FooI, &1);
    assert_eq!(ones, vec![&records()[0], &records()[2]]);

    let mut above: Vec<&Foo> = store.get_by_predicate(FooD, |d| *d > 2.7);
    above.sort_by_key(|foo| foo.c);
    assert_eq!(above, vec![&records()[0], &records()[1], &records()[2]]);
}

#[test]
fn test_empty_store_scenario() {
    init_tracing();

    let store = IndexedStore::<Foo, (FooI, FooD)>::new();

    assert!(store.get_all().is_empty());
    assert!(store.get_by_value(FooI, &1).is_empty());
}

#[test]
fn test_unindexed_field_on_dynamic_store() {
    init_tracing();

    let mut store = DynIndexedStore::builder()
        .index(FooI)
        .index(FooD)
        .with_capacity(3)
        .build();
    store.extend(records());

    assert_eq!(
        store.get_by_value(FooI, &1).map(|found| found.len()),
        Ok(2)
    );
    assert!(matches!(
        store.get_by_value(FooC, &'c'),
        Err(IndexError::NotIndexed { field: "c", .. })
    ));
}

#[test]
fn test_row_ids_resolve_to_added_records() {
    init_tracing();

    let mut store = IndexedStore::<Foo, (FooS,)>::with_capacity(3);
    let rows: Vec<RowId> = records().into_iter().map(|r| store.add(r)).collect();

    for (row, expected) in rows.iter().zip(records().iter()) {
        assert_eq!(store.get(*row), Some(expected));
    }
    assert_eq!(store.rows_by_key(FooS, "World"), &[rows[1]]);
}

#[test]
fn test_static_and_dynamic_agree() {
    init_tracing();

    let mut fixed = IndexedStore::<Foo, (FooI, FooD, FooC, FooS)>::new();
    let mut dynamic = DynIndexedStore::builder()
        .index(FooI)
        .index(FooD)
        .index(FooC)
        .index(FooS)
        .build();

    for record in records().into_iter().cycle().take(30) {
        fixed.add(record.clone());
        dynamic.add(record);
    }

    for i in 0..4 {
        assert_eq!(
            fixed.rows_by_value(FooI, &i),
            dynamic.rows_by_value(FooI, &i).unwrap()
        );
    }

    let mut fixed_rows = fixed.rows_by_predicate(FooC, |c| *c != 'b');
    let mut dynamic_rows = dynamic.rows_by_predicate(FooC, |c| *c != 'b').unwrap();
    fixed_rows.sort();
    dynamic_rows.sort();
    assert_eq!(fixed_rows, dynamic_rows);
    assert_eq!(fixed_rows.len(), 20);
}
