#![no_main]
use libfuzzer_sys::fuzz_target;
use multiformat::csv::{self, CsvConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(table) = csv::parse(s, &CsvConfig::default()) {
            let _ = table.to_csv_string(',');
        }
    }
});
