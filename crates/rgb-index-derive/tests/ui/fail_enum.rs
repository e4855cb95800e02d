//! Test that enums cannot derive Fields.
#![allow(dead_code)]

use rgb_index::Fields;

#[derive(Fields)]
enum Kind {
    Player,
    Mob,
}

fn main() {}
