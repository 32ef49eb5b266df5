//! JSON values, parser and serializer

mod parser;
mod serializer;
mod value;

use tracing::{debug, instrument};

pub use self::parser::JsonParser;
pub use self::serializer::{serialize, serialize_pretty, serialize_with_config};
pub use self::value::Value;

use crate::config::FormatConfig;
use crate::error::Result;
use crate::utils::{read_file, write_file};

pub fn parse(input: &str) -> Result<Value> {
    JsonParser::new(input)?.parse()
}

#[instrument]
pub fn parse_file(path: &str) -> Result<Value> {
    let content = read_file(path)?;
    debug!("Read {} bytes, parsing JSON", content.len());
    parse(&content).map_err(|e| e.with_context(format!("in {}", path)))
}

#[instrument(skip(value))]
pub fn serialize_to_file(value: &Value, path: &str, config: &FormatConfig) -> Result<()> {
    write_file(path, &serialize_with_config(value, config))
}
