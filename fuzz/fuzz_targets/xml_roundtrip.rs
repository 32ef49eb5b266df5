#![no_main]
use libfuzzer_sys::fuzz_target;
use multiformat::xml;

// Whatever parses cleanly must serialize into something that parses again
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let doc = xml::parse(s);
        if let Ok(text) = xml::serialize_pretty(&doc, 2) {
            let again = xml::parse(&text);
            assert!(!again.has_error(), "{:?}", again.error());
        }
    }
});
