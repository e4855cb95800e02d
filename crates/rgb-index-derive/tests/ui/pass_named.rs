//! Test that every named field gets a selector.

use rgb_index::{Field, Fields, IndexedStore};

#[derive(Fields)]
struct Foo {
    i: i32,
    d: f64,
    c: char,
    s: String,
}

fn main() {
    assert_eq!(FooI::NAME, "i");
    assert_eq!(FooD::NAME, "d");
    assert_eq!(FooC::NAME, "c");
    assert_eq!(FooS::NAME, "s");

    let mut store = IndexedStore::<Foo, (FooI, FooD, FooC, FooS)>::new();
    store.add(Foo {
        i: 1,
        d: 0.5,
        c: 'c',
        s: "Foo".to_string(),
    });

    assert_eq!(store.get_by_value(FooS, &"Foo".to_string()).len(), 1);
}
