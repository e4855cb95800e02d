//! Test that unions cannot derive Fields.
#![allow(dead_code)]

use rgb_index::Fields;

#[derive(Fields)]
union Bits {
    int: u32,
    float: f32,
}

fn main() {}
