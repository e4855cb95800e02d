//! Test that tuple structs cannot derive Fields.
#![allow(dead_code)]

use rgb_index::Fields;

#[derive(Fields)]
struct Pair(u32, u32);

fn main() {}
