//! XML document model
//!
//! [`parse`] builds a [`Document`]: an arena of nodes addressed by
//! [`NodeId`] handles, with a single root element. The document exposes the
//! full query and mutation API, and [`serialize`] / [`serialize_pretty`]
//! turn it back into text.
//!
//! Parsing folds comments, CDATA sections and character data into the
//! enclosing element's own text. Text, comment and CDATA nodes only appear
//! as children when built through the API (or, for comments, when
//! [`ParserConfig::retain_comments`] is set).
//!
//! ```
//! use multiformat::xml;
//!
//! let mut doc = xml::parse("<a><b>hi</b></a>");
//! let root = doc.root().unwrap();
//! let b = doc.find_by_path(root, "b").unwrap();
//! doc.set_node_text(b, "bye").unwrap();
//! assert_eq!(
//!     xml::serialize(&doc).unwrap(),
//!     r#"<?xml version="1.0" encoding="UTF-8"?><a><b>bye</b></a>"#
//! );
//! ```

mod document;
mod escape;
mod node;
mod parser;
mod scanner;
mod serializer;

use tracing::{debug, instrument, warn};

pub use self::document::Document;
pub use self::escape::{decode_text_entities, escape, unescape};
pub use self::node::{Attribute, NodeId, NodeKind, NodeType};
pub use self::parser::{is_well_formed, parse, parse_with_config, Parser};
pub use self::scanner::{is_name_char, is_name_start, Scanner};
pub use self::serializer::{
    serialize, serialize_node, serialize_pretty, serialize_with_config, DECLARATION,
};

use crate::config::{FormatConfig, ParserConfig};
use crate::error::Result;
use crate::utils::{read_file, write_file};

/// Read and parse an XML file
///
/// Only a failed read is an `Err`; malformed markup yields a document that
/// carries the error.
#[instrument]
pub fn parse_file(path: &str) -> Result<Document> {
    parse_file_with_config(path, ParserConfig::default())
}

pub fn parse_file_with_config(path: &str, config: ParserConfig) -> Result<Document> {
    let content = read_file(path)?;
    debug!("Read {} bytes, parsing XML", content.len());

    let doc = parse_with_config(&content, config);
    if let Some(err) = doc.error() {
        warn!("XML parse error in {}: {}", path, err);
    }
    Ok(doc)
}

/// Serialize `doc` into `path`. An `indent` of 0 or less writes compact
/// output; wider indents are capped at 8.
#[instrument(skip(doc))]
pub fn serialize_to_file(doc: &Document, path: &str, indent: i32) -> Result<()> {
    let text = serialize_with_config(doc, &FormatConfig::from_indent(indent))?;
    write_file(path, &text)
}

#[instrument(skip(doc))]
pub fn serialize_node_to_file(doc: &Document, node: NodeId, path: &str, indent: i32) -> Result<()> {
    let text = serialize_node(doc, node, &FormatConfig::from_indent(indent))?;
    write_file(path, &text)
}
