//! Character-level scanning for the XML parser

use crate::cursor::Cursor;
use crate::error::{Error, Location, Result, SyntaxError};

/// Position-tracking reader over an XML buffer
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Scanner<'a> {
    pub const fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
        }
    }

    pub fn peek(&self) -> Option<u8> {
        self.cursor.current()
    }

    pub fn advance(&mut self) {
        self.cursor.advance();
    }

    pub fn advance_by(&mut self, count: usize) {
        self.cursor.advance_by(count);
    }

    pub fn consume(&mut self, expected: u8) -> bool {
        self.cursor.consume(expected)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.cursor.starts_with(prefix)
    }

    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    pub const fn pos(&self) -> usize {
        self.cursor.pos()
    }

    pub fn slice_from(&self, start: usize) -> &'a str {
        self.cursor.slice_from(start)
    }

    pub const fn location(&self) -> Location {
        self.cursor.location()
    }

    /// Skip all whitespace, counting lines
    pub fn skip_whitespace(&mut self) {
        self.cursor.skip_whitespace();
    }

    /// Skip spaces and tabs only
    pub fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t')) {
            self.advance();
        }
    }

    /// Advance until `terminator` has been consumed. Returns the text before
    /// it, or `None` (with the scanner at end of input) if it never appears.
    pub fn take_until(&mut self, terminator: &str) -> Option<&'a str> {
        let start = self.pos();
        while !self.is_eof() {
            if self.starts_with(terminator) {
                let body = self.slice_from(start);
                self.advance_by(terminator.len());
                return Some(body);
            }
            self.advance();
        }
        None
    }

    pub fn error_here(&self, kind: SyntaxError) -> Error {
        Self::error_at(self.location(), kind)
    }

    pub fn error_at(location: Location, kind: SyntaxError) -> Error {
        Error::new(kind).with_location(location.line, location.column)
    }

    /// Parse a Name token
    ///
    /// The first character must be an ASCII letter; `_` and `:` are only
    /// accepted after it.
    pub fn parse_name(&mut self) -> Result<String> {
        match self.peek() {
            Some(b) if is_name_start(b) => {}
            _ => return Err(self.error_here(SyntaxError::ExpectedName)),
        }

        let start = self.pos();
        while self.peek().is_some_and(is_name_char) {
            self.advance();
        }
        Ok(self.slice_from(start).to_string())
    }

    /// Parse a `'` or `"` delimited string, returning the raw text between
    /// the quotes. Entity references are not decoded here.
    pub fn parse_quoted(&mut self) -> Result<String> {
        let delimiter = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => {
                return Err(self.error_here(SyntaxError::Expected(
                    "quoted attribute value".to_string(),
                )))
            }
        };
        let opened_at = self.location();
        self.advance();

        let start = self.pos();
        while let Some(b) = self.peek() {
            if b == delimiter {
                let value = self.slice_from(start).to_string();
                self.advance();
                return Ok(value);
            }
            self.advance();
        }

        Err(Self::error_at(opened_at, SyntaxError::Unterminated("string")))
    }
}

pub const fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

pub const fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b':' | b'-' | b'.')
}
