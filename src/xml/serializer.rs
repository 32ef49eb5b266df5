//! XML serializer
//!
//! Layout is derived from the tree alone. An element with neither text nor
//! children is written self-closing. In pretty mode an element whose
//! children are all text or CDATA keeps them on its own line; otherwise each
//! child goes on a line of its own, indented by depth.

use crate::config::FormatConfig;
use crate::error::{Result, SerializeError, TreeError};
use crate::xml::document::Document;
use crate::xml::escape::escape_into;
use crate::xml::node::{NodeId, NodeKind, CDATA_CLOSE, CDATA_OPEN, COMMENT_CLOSE, COMMENT_OPEN};

pub const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Compact serialization with the XML declaration
pub fn serialize(doc: &Document) -> Result<String> {
    serialize_with_config(doc, &FormatConfig::compact())
}

/// Indented serialization; `indent` is clamped to 1..=8 and 0 or less
/// selects two spaces.
pub fn serialize_pretty(doc: &Document, indent: i32) -> Result<String> {
    serialize_with_config(doc, &FormatConfig::pretty(indent))
}

pub fn serialize_with_config(doc: &Document, config: &FormatConfig) -> Result<String> {
    if doc.has_error() {
        return Err(SerializeError::DocumentHasError.into());
    }
    let root = doc.root().ok_or(SerializeError::NoRoot)?;

    let mut serializer = Serializer::new(doc, config);
    serializer.out.push_str(DECLARATION);
    serializer.newline();
    serializer.write_node(root, 0);
    Ok(serializer.out)
}

/// Serialize a single node and its subtree, without the declaration
pub fn serialize_node(doc: &Document, node: NodeId, config: &FormatConfig) -> Result<String> {
    doc.node_kind(node).ok_or(TreeError::InvalidNode)?;
    let mut serializer = Serializer::new(doc, config);
    serializer.write_node(node, 0);
    Ok(serializer.out)
}

struct Serializer<'d> {
    doc: &'d Document,
    indent_spaces: usize,
    out: String,
}

impl<'d> Serializer<'d> {
    fn new(doc: &'d Document, config: &FormatConfig) -> Self {
        Self {
            doc,
            indent_spaces: config.indent_spaces,
            out: String::new(),
        }
    }

    const fn pretty(&self) -> bool {
        self.indent_spaces > 0
    }

    fn newline(&mut self) {
        if self.pretty() {
            self.out.push('\n');
        }
    }

    fn indent(&mut self, depth: usize) {
        if self.pretty() {
            self.out.push_str(&" ".repeat(depth * self.indent_spaces));
        }
    }

    /// Write a node on its own line(s)
    fn write_node(&mut self, node: NodeId, depth: usize) {
        let doc = self.doc;
        let Some(kind) = doc.node_kind(node) else {
            return;
        };
        self.indent(depth);
        match kind {
            NodeKind::Element {
                name,
                attributes,
                text,
            } => {
                self.out.push('<');
                self.out.push_str(name);
                for attr in attributes {
                    self.out.push(' ');
                    self.out.push_str(&attr.name);
                    self.out.push_str("=\"");
                    escape_into(&mut self.out, &attr.value);
                    self.out.push('"');
                }
                let text = text.as_deref().filter(|t| !t.is_empty());
                self.write_element_body(node, name, text, depth);
            }
            inline => self.write_inline(inline),
        }
        self.newline();
    }

    fn write_element_body(&mut self, node: NodeId, name: &str, text: Option<&str>, depth: usize) {
        let doc = self.doc;
        let children = doc.children(node);
        if children.is_empty() && text.is_none() {
            self.out.push_str("/>");
            return;
        }

        self.out.push('>');
        if let Some(text) = text {
            escape_into(&mut self.out, text);
        }

        let inline = text.is_none()
            && children.iter().all(|&c| {
                matches!(
                    doc.node_kind(c),
                    Some(NodeKind::Text(_) | NodeKind::CData(_))
                )
            });

        if inline {
            for &child in children {
                if let Some(kind) = doc.node_kind(child) {
                    self.write_inline(kind);
                }
            }
        } else if !children.is_empty() {
            self.newline();
            for &child in children {
                self.write_node(child, depth + 1);
            }
            self.indent(depth);
        }

        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
    }

    /// Text, comment or CDATA content without any layout around it
    fn write_inline(&mut self, kind: &NodeKind) {
        match kind {
            NodeKind::Text(text) => escape_into(&mut self.out, text),
            NodeKind::Comment(text) => {
                self.out.push_str(COMMENT_OPEN);
                self.out.push_str(text);
                self.out.push_str(COMMENT_CLOSE);
            }
            NodeKind::CData(data) => {
                self.out.push_str(CDATA_OPEN);
                self.out.push_str(data);
                self.out.push_str(CDATA_CLOSE);
            }
            NodeKind::Element { .. } => {}
        }
    }
}
