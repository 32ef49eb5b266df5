//! Error handling types shared by every format
//!
//! Parse errors carry a 1-based line/column where one is known. Tree mutation
//! errors never carry a location; they are returned before anything changes.

use std::fmt;

use thiserror::Error as ThisError;

/// Main error type for parsing, tree mutation and serialization
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The specific kind of error
    kind: ErrorKind,
    /// Location where the error occurred
    location: Option<Location>,
    /// Additional context for the error
    context: Option<String>,
}

/// A position in the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl Location {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn create_error(&self, kind: ErrorKind, context: &str) -> Error {
        Error::new(kind)
            .with_location(self.line, self.column)
            .with_context(context)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Top-level error categories
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ErrorKind {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Serialize(#[from] SerializeError),
    #[error(transparent)]
    Security(#[from] SecurityError),
    #[error("Unknown file format")]
    UnknownFormat,
}

/// Malformed input
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum SyntaxError {
    #[error("Expected name")]
    ExpectedName,
    #[error("Expected {0}")]
    Expected(String),
    #[error("Unterminated {0}")]
    Unterminated(&'static str),
    #[error("Mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedTag { expected: String, found: String },
    #[error("Mismatched closing tag: </{0}> has no open element")]
    UnexpectedClosingTag(String),
    #[error("Multiple root elements")]
    MultipleRoots,
    #[error("Unclosed elements")]
    UnclosedElements,
    #[error("Duplicate attribute '{0}'")]
    DuplicateAttribute(String),
    #[error("Unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),
    #[error("Invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("Invalid unicode escape")]
    InvalidUnicode,
    #[error("Extra data after document")]
    TrailingContent,
    #[error("Missing header line")]
    MissingHeader,
}

/// Invalid arguments to a tree operation
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum TreeError {
    #[error("Node handle does not refer to a live node")]
    InvalidNode,
    #[error("Node is not an element")]
    NotAnElement,
    #[error("Operation not supported for {0} nodes")]
    WrongNodeType(&'static str),
    #[error("Node already has a parent")]
    AlreadyParented,
    #[error("Node is not a child of the given parent")]
    NotAChild,
    #[error("Node cannot be inserted into its own subtree")]
    CycleDetected,
    #[error("The document root cannot become a child")]
    RootNotMovable,
    #[error("Attribute '{0}' not found")]
    AttributeNotFound(String),
}

/// Serializer failures
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum SerializeError {
    #[error("Document carries a parse error")]
    DocumentHasError,
    #[error("Document has no root element")]
    NoRoot,
}

/// Resource limits
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum SecurityError {
    #[error("Maximum nesting depth ({0}) exceeded")]
    MaxDepthExceeded(usize),
    #[error("Input size ({size} bytes) exceeds maximum allowed ({max})")]
    MaxSizeExceeded { size: usize, max: usize },
}

/// IO operation errors
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Read error: {0}")]
    ReadError(String),
    #[error("Write error: {0}")]
    WriteError(String),
}

impl Error {
    pub fn new(kind: impl Into<ErrorKind>) -> Self {
        Self {
            kind: kind.into(),
            location: None,
            context: None,
        }
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.location = Some(Location::new(line, column));
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// The bare description of the error kind, without location or context
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl From<TreeError> for Error {
    fn from(err: TreeError) -> Self {
        Self::new(err)
    }
}

impl From<SerializeError> for Error {
    fn from(err: SerializeError) -> Self {
        Self::new(err)
    }
}

impl From<IoError> for Error {
    fn from(err: IoError) -> Self {
        Self::new(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = &self.location {
            write!(
                f,
                "at line {}, column {}: {}",
                loc.line, loc.column, self.kind
            )?;
        } else {
            write!(f, "Error: {}", self.kind)?;
        }

        if let Some(ctx) = &self.context {
            write!(f, "\nContext: {}", ctx)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
