//! Fuzz target for OWASP event record parsing.
//!
//! Arbitrary input must never panic; any record that parses must serialize
//! to JSON that is stable across another parse.

#![no_main]

use libfuzzer_sys::fuzz_target;
use owasp_logger::OwaspEvent;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(event) = OwaspEvent::from_json(text) {
        let json = event.to_json().expect("parsed event serializes");
        let again = OwaspEvent::from_json(&json).expect("serialized event parses");
        assert_eq!(again.to_json().expect("reparsed event serializes"), json);
    }
});
