//! Fuzz target: path id and `limit` query parsing.

#![no_main]

use items_core::{ItemId, ListLimit};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(id) = ItemId::parse(s) {
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    }

    if let Ok(limit) = ListLimit::parse(Some(s)) {
        assert!((1..=100).contains(&limit.get()));
    }
});
