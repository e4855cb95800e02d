//! Test that caller-defined value types can be indexed.

use rgb_index::{Fields, IndexedStore, index_value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Kind {
    Player,
    Mob,
}

index_value!(Kind);

#[derive(Fields)]
struct Entity {
    kind: Kind,
    health: f32,
}

fn main() {
    let mut store = IndexedStore::<Entity, (EntityKind, EntityHealth)>::new();
    store.add(Entity {
        kind: Kind::Player,
        health: 20.0,
    });
    store.add(Entity {
        kind: Kind::Mob,
        health: 8.0,
    });

    assert_eq!(store.get_by_value(EntityKind, &Kind::Mob).len(), 1);
    assert_eq!(store.get_by_predicate(EntityHealth, |h| *h > 10.0).len(), 1);
}
