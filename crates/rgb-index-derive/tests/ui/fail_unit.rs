//! Test that unit structs cannot derive Fields.
#![allow(dead_code)]

use rgb_index::Fields;

#[derive(Fields)]
struct Marker;

fn main() {}
