//! Test selector naming for snake_case and raw identifiers.

use rgb_index::{Field, Fields};

#[derive(Fields)]
pub struct Session {
    pub last_seen: u64,
    pub r#type: &'static str,
    pub region: Option<u16>,
}

fn main() {
    let session = Session {
        last_seen: 100,
        r#type: "guest",
        region: Some(3),
    };

    assert_eq!(SessionLastSeen::NAME, "last_seen");
    assert_eq!(SessionType::NAME, "type");
    assert_eq!(*SessionType::get(&session), "guest");
    assert_eq!(*SessionRegion::get(&session), Some(3));
}
