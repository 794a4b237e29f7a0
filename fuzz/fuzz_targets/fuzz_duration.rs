//! Fuzz target: Go-style duration parser
//!
//! Feeds arbitrary UTF-8 into `duration::parse` and verifies:
//! - No panics or arithmetic overflow under arbitrary input
//! - Anything accepted re-formats to a string that parses to the same value
//!
//! cargo fuzz run fuzz_duration

#![no_main]

use libfuzzer_sys::fuzz_target;
use pumpkinpi::duration;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(d) = duration::parse(s) {
        let text = duration::format(d);
        assert_eq!(duration::parse(&text), Ok(d), "{s:?} -> {text:?}");
    }
});
