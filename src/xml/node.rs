//! Node types stored in a [`Document`](super::Document) arena

use std::fmt;

pub(crate) const COMMENT_OPEN: &str = "<!--";
pub(crate) const COMMENT_CLOSE: &str = "-->";
pub(crate) const CDATA_OPEN: &str = "<![CDATA[";
pub(crate) const CDATA_CLOSE: &str = "]]>";

/// Handle to a node inside a document
///
/// Handles are only meaningful for the document that issued them. Once the
/// node is freed, the handle goes stale and every lookup through it fails,
/// even if the slot is later reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

/// What kind of node a handle refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Element,
    Text,
    Comment,
    CData,
    /// Reported for stale or foreign handles
    Unknown,
}

impl NodeType {
    /// Classify raw markup by its wrapper markers.
    ///
    /// Content wrapped in `<!--` / `-->` is a comment, content wrapped in
    /// `<![CDATA[` / `]]>` is a CDATA section, anything else is text.
    pub fn infer(raw: &str) -> Self {
        if raw.len() >= COMMENT_OPEN.len() + COMMENT_CLOSE.len()
            && raw.starts_with(COMMENT_OPEN)
            && raw.ends_with(COMMENT_CLOSE)
        {
            Self::Comment
        } else if raw.len() >= CDATA_OPEN.len() + CDATA_CLOSE.len()
            && raw.starts_with(CDATA_OPEN)
            && raw.ends_with(CDATA_CLOSE)
        {
            Self::CData
        } else {
            Self::Text
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Element => "ELEMENT",
            Self::Text => "TEXT",
            Self::Comment => "COMMENT",
            Self::CData => "CDATA",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Payload of a node
///
/// Element attributes are kept newest-first: a newly set attribute goes to
/// the front, so enumeration runs in reverse of the order they were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        name: String,
        attributes: Vec<Attribute>,
        text: Option<String>,
    },
    Text(String),
    Comment(String),
    CData(String),
}

impl NodeKind {
    pub fn element(name: impl Into<String>) -> Self {
        Self::Element {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
        }
    }

    /// Build a non-element payload from marker-wrapped markup, stripping the
    /// markers.
    pub fn from_markup(raw: &str) -> Self {
        match NodeType::infer(raw) {
            NodeType::Comment => Self::Comment(strip(raw, COMMENT_OPEN, COMMENT_CLOSE)),
            NodeType::CData => Self::CData(strip(raw, CDATA_OPEN, CDATA_CLOSE)),
            _ => Self::Text(raw.to_string()),
        }
    }

    pub const fn node_type(&self) -> NodeType {
        match self {
            Self::Element { .. } => NodeType::Element,
            Self::Text(_) => NodeType::Text,
            Self::Comment(_) => NodeType::Comment,
            Self::CData(_) => NodeType::CData,
        }
    }
}

fn strip(raw: &str, open: &str, close: &str) -> String {
    raw.strip_prefix(open)
        .and_then(|s| s.strip_suffix(close))
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl NodeData {
    pub(crate) const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }
}
