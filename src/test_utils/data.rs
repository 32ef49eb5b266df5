use std::fs;

use crate::error::{Error, IoError, Result};

pub struct TestData {
    pub catalog_xml: String,
    pub small_json: String,
    pub people_csv: String,
}

impl TestData {
    pub fn load() -> Result<Self> {
        Ok(Self {
            catalog_xml: read_test_file("tests/input/catalog.xml")?,
            small_json: read_test_file("tests/input/small.json")?,
            people_csv: read_test_file("tests/input/people.csv")?,
        })
    }
}

pub fn read_test_file(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::new(IoError::ReadError(format!(
            "Failed to read {}: {}",
            path, e
        )))
    })
}

pub const TEST_FILES: [&str; 3] = [
    "tests/input/catalog.xml",
    "tests/input/small.json",
    "tests/input/people.csv",
];

/// Malformed XML with the message each one should report
pub const INVALID_XML_SAMPLES: [(&str, &str); 10] = [
    ("<a><b></a>", "Mismatched closing tag"),
    ("<a></a><b/>", "Multiple root elements"),
    ("<a><b>", "Unclosed elements"),
    ("<a x=\"1></a>", "Unterminated string"),
    ("<a><!-- never closed</a>", "Unterminated comment"),
    ("<a><![CDATA[raw</a>", "Unterminated CDATA"),
    ("<?pi never closed", "Unterminated processing instruction"),
    ("<a x></a>", "Expected '=' after attribute name"),
    ("<a></a", "Expected '>' in closing tag"),
    ("<_a/>", "Expected name"),
];
