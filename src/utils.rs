use std::fs;

use crate::{
    config::FormatConfig,
    csv::{self, CsvConfig, Table},
    error::{Error, IoError, Result},
    json::{self, Value},
    xml::{self, Document},
};

pub fn read_file(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::new(IoError::FileNotFound(path.to_string())),
        std::io::ErrorKind::PermissionDenied => {
            Error::new(IoError::PermissionDenied(path.to_string()))
        }
        _ => Error::new(IoError::ReadError(format!("{}: {}", path, e))),
    })
}

pub fn write_file(path: &str, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => {
            Error::new(IoError::PermissionDenied(path.to_string()))
        }
        _ => Error::new(IoError::WriteError(format!("{}: {}", path, e))),
    })
}

pub fn parse_xml(content: &str) -> Document {
    xml::parse(content)
}

pub fn parse_json(content: &str) -> Result<Value> {
    json::parse(content)
}

pub fn parse_csv(content: &str) -> Result<Table> {
    csv::parse(content, &CsvConfig::default())
}

/// XML with two-space indentation
pub fn format_xml(doc: &Document) -> Result<String> {
    xml::serialize_with_config(doc, &FormatConfig::default())
}

pub fn format_json(value: &Value) -> String {
    json::serialize_with_config(value, &FormatConfig::default())
}

pub fn format_csv(table: &Table) -> String {
    table.to_csv_string(',')
}
