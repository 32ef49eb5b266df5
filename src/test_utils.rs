mod comparison;
mod data;
mod helpers;

pub use comparison::{assert_trees_equal, assert_values_equal, compare_values, trees_equal};
pub use data::{TestData, INVALID_XML_SAMPLES, TEST_FILES};
pub use helpers::{build_catalog, tmp_file_path};

// Re-export common test types
pub use crate::{
    config::{FormatConfig, ParserConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE},
    csv::{self, CsvConfig, Table},
    enums::Format,
    error::{
        Error, ErrorKind, IoError, Location, Result, SecurityError, SerializeError, SyntaxError,
        TreeError,
    },
    json::{self, JsonParser, Value},
    parse_file, parse_file_as,
    utils::{
        format_csv, format_json, format_xml, parse_csv, parse_json, parse_xml, read_file,
        write_file,
    },
    xml::{self, Attribute, Document, NodeId, NodeKind, NodeType},
    Parsed,
};
