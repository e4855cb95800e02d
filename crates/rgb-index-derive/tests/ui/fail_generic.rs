//! Test that generic structs cannot derive Fields.
#![allow(dead_code)]

use rgb_index::Fields;

#[derive(Fields)]
struct Wrapper<T> {
    value: T,
}

fn main() {}
