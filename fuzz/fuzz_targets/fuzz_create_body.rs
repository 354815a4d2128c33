//! Fuzz target: create request body decoding and validation.
//!
//! Arbitrary bytes must never panic the parse or validate steps, and any
//! accepted input must satisfy the stored-item invariants.

#![no_main]

use items_core::{validate_create_input, RawInput};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = RawInput::parse(data) else {
        return;
    };
    let Ok(fields) = validate_create_input(&raw) else {
        return;
    };

    let title_len = fields.title.chars().count();
    assert!((1..=200).contains(&title_len), "accepted title length {title_len}");
    let body_len = fields.body.chars().count();
    assert!((1..=4000).contains(&body_len), "accepted body length {body_len}");
    for optional in [&fields.category, &fields.priority, &fields.author] {
        assert!(optional.chars().count() <= 100);
        assert_eq!(optional.trim(), optional.as_str(), "optional fields are trimmed");
    }
});
