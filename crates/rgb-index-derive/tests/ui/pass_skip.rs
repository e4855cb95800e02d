//! Test that `#[field(skip)]` fields get no selector and need no IndexValue.

use rgb_index::{Field, Fields};

#[derive(Fields)]
struct Packet {
    id: u64,
    #[field(skip)]
    payload: Vec<u8>,
}

fn main() {
    let packet = Packet {
        id: 9,
        payload: vec![1, 2, 3],
    };

    assert_eq!(*PacketId::get(&packet), 9);
    assert_eq!(packet.payload.len(), 3);
}
