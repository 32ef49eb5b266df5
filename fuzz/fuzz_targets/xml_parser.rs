#![no_main]
use libfuzzer_sys::fuzz_target;
use multiformat::xml;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let doc = xml::parse(s);
        if doc.has_error() {
            assert!(doc.error_line() >= 1 && doc.error_column() >= 1);
        }
    }
});
