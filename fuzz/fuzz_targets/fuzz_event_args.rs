//! Fuzz target for building events from key/value arguments.

#![no_main]

use std::collections::HashMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use owasp_logger::SecurityEvent;

#[derive(Debug, Arbitrary)]
struct Input {
    category: String,
    args: HashMap<String, String>,
}

fuzz_target!(|input: Input| {
    // Only Ok or Err; a built event must produce a non-empty id.
    if let Ok(event) = SecurityEvent::from_args(&input.category, &input.args) {
        assert!(!event.event_id().is_empty());
        assert!(!event.description().is_empty());
    }
});
