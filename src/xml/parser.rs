//! Recursive-descent XML parser
//!
//! The parser keeps a stack of open elements rather than recursing per
//! nesting level, so the depth limit in [`ParserConfig`] is the only bound
//! on nesting. The first error stops the parse and is recorded on the
//! returned [`Document`] together with the tree built so far.

use tracing::trace;

use crate::config::ParserConfig;
use crate::error::{Error, Result, SyntaxError};
use crate::xml::document::Document;
use crate::xml::escape::{decode_text_entities, unescape};
use crate::xml::node::NodeId;
use crate::xml::scanner::Scanner;

/// Parse `input` with the default configuration
pub fn parse(input: &str) -> Document {
    parse_with_config(input, ParserConfig::default())
}

pub fn parse_with_config(input: &str, config: ParserConfig) -> Document {
    if let Err(err) = config.validate_input_size(input) {
        let mut doc = Document::new();
        doc.set_error(err);
        return doc;
    }
    Parser::new(input, config).finish()
}

/// True when `input` parses without error and has a root element.
///
/// Empty or whitespace-only input parses cleanly but has no root, so it is
/// not well formed.
pub fn is_well_formed(input: &str) -> bool {
    let doc = parse(input);
    !doc.has_error() && doc.root().is_some()
}

#[derive(Debug)]
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    config: ParserConfig,
    doc: Document,
    /// Elements still awaiting their closing tag, innermost last
    open: Vec<NodeId>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, config: ParserConfig) -> Self {
        Self {
            scanner: Scanner::new(input),
            config,
            doc: Document::new(),
            open: Vec::new(),
        }
    }

    /// Run to the end of input or the first error, then hand back the
    /// document.
    pub fn finish(mut self) -> Document {
        self.run();
        self.doc
    }

    fn run(&mut self) {
        if let Err(err) = self.parse_document() {
            trace!("parse stopped: {}", err);
            self.doc.set_error(err);
        }
    }

    fn parse_document(&mut self) -> Result<()> {
        loop {
            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                None => break,
                Some(b'<') => self.parse_markup()?,
                Some(_) => self.parse_text(),
            }
        }

        if !self.open.is_empty() {
            return Err(self.scanner.error_here(SyntaxError::UnclosedElements));
        }
        Ok(())
    }

    fn current(&self) -> Option<NodeId> {
        self.open.last().copied()
    }

    fn parse_markup(&mut self) -> Result<()> {
        if self.scanner.starts_with("<!--") {
            trace!("comment");
            self.parse_comment()
        } else if self.scanner.starts_with("<![CDATA[") {
            trace!("cdata");
            self.parse_cdata()
        } else if self.scanner.starts_with("<!") {
            trace!("markup declaration");
            self.skip_markup_declaration()
        } else if self.scanner.starts_with("<?") {
            trace!("processing instruction");
            self.parse_processing_instruction()
        } else if self.scanner.starts_with("</") {
            self.parse_closing_tag()
        } else {
            self.parse_opening_tag()
        }
    }

    fn parse_comment(&mut self) -> Result<()> {
        let start = self.scanner.location();
        self.scanner.advance_by(4);
        let body = self
            .scanner
            .take_until("-->")
            .ok_or_else(|| Scanner::error_at(start, SyntaxError::Unterminated("comment")))?;

        if self.config.retain_comments {
            if let Some(parent) = self.current() {
                let comment = self.doc.create_comment(body);
                self.doc.link(parent, comment, None);
            }
        }
        Ok(())
    }

    /// The payload is merged into the open element's text, markers dropped
    fn parse_cdata(&mut self) -> Result<()> {
        let start = self.scanner.location();
        self.scanner.advance_by(9);
        let body = self
            .scanner
            .take_until("]]>")
            .ok_or_else(|| Scanner::error_at(start, SyntaxError::Unterminated("CDATA")))?;

        if let Some(node) = self.current() {
            self.doc.append_text(node, body);
        }
        Ok(())
    }

    /// Skip `<!DOCTYPE ...>` and similar, including a bracketed internal
    /// subset
    fn skip_markup_declaration(&mut self) -> Result<()> {
        let start = self.scanner.location();
        self.scanner.advance_by(2);

        let mut depth = 0usize;
        while let Some(b) = self.scanner.peek() {
            self.scanner.advance();
            match b {
                b'[' => depth += 1,
                b']' => depth = depth.saturating_sub(1),
                b'>' if depth == 0 => return Ok(()),
                _ => {}
            }
        }
        Err(Scanner::error_at(start, SyntaxError::Unterminated("declaration")))
    }

    /// `<?xml ...?>` has its pseudo-attributes checked and dropped; any other
    /// processing instruction is skipped whole.
    fn parse_processing_instruction(&mut self) -> Result<()> {
        let start = self.scanner.location();
        self.scanner.advance_by(2);
        let target = self.scanner.parse_name()?;

        if target != "xml" {
            return self.scanner.take_until("?>").map(|_| ()).ok_or_else(|| {
                Scanner::error_at(start, SyntaxError::Unterminated("processing instruction"))
            });
        }

        self.scanner.skip_spaces();
        while self.scanner.peek().is_some_and(|b| b != b'?') {
            self.scanner.parse_name()?;
            self.scanner.skip_spaces();
            if !self.scanner.consume(b'=') {
                return Err(self.expected("'=' in XML declaration"));
            }
            self.scanner.skip_spaces();
            self.scanner.parse_quoted()?;
            self.scanner.skip_spaces();
        }

        if !self.scanner.consume(b'?') {
            return Err(self.expected("'?' in XML declaration"));
        }
        if !self.scanner.consume(b'>') {
            return Err(self.expected("'>' after XML declaration"));
        }
        Ok(())
    }

    fn parse_closing_tag(&mut self) -> Result<()> {
        let start = self.scanner.location();
        self.scanner.advance_by(2);
        let name = self.scanner.parse_name()?;
        self.scanner.skip_whitespace();
        if !self.scanner.consume(b'>') {
            return Err(self.expected("'>' in closing tag"));
        }

        let Some(open) = self.current() else {
            return Err(Scanner::error_at(
                start,
                SyntaxError::UnexpectedClosingTag(name),
            ));
        };
        let open_name = self.doc.node_name(open).unwrap_or_default();
        if open_name != name {
            return Err(Scanner::error_at(
                start,
                SyntaxError::MismatchedTag {
                    expected: open_name.to_string(),
                    found: name,
                },
            ));
        }

        trace!("closed <{}>", name);
        self.open.pop();
        Ok(())
    }

    fn parse_opening_tag(&mut self) -> Result<()> {
        let start = self.scanner.location();
        self.scanner.advance();
        let name = self.scanner.parse_name()?;

        let parent = self.current();
        if parent.is_none() && self.doc.root().is_some() {
            return Err(Scanner::error_at(start, SyntaxError::MultipleRoots));
        }
        self.config
            .validate_depth(self.open.len() + 1)
            .map_err(|e| e.with_location(start.line, start.column))?;

        trace!("opened <{}>", name);
        let node = self.doc.create_element(name);
        match parent {
            Some(parent) => self.doc.link(parent, node, None),
            None => self.doc.replace_root(node),
        }

        self.parse_attributes(node)?;

        let self_closing = self.scanner.consume(b'/');
        self.scanner.skip_whitespace();
        if !self.scanner.consume(b'>') {
            return Err(self.expected("'>' after element"));
        }

        if !self_closing {
            self.open.push(node);
        }
        Ok(())
    }

    /// Attributes are prepended, so they enumerate in reverse source order
    fn parse_attributes(&mut self, node: NodeId) -> Result<()> {
        loop {
            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                None | Some(b'>' | b'/') => return Ok(()),
                Some(_) => {}
            }

            let at = self.scanner.location();
            let name = self.scanner.parse_name()?;
            self.scanner.skip_whitespace();
            if !self.scanner.consume(b'=') {
                return Err(self.expected("'=' after attribute name"));
            }
            self.scanner.skip_whitespace();
            let raw = self.scanner.parse_quoted()?;

            if self.doc.has_attribute(node, &name) {
                return Err(Scanner::error_at(at, SyntaxError::DuplicateAttribute(name)));
            }
            self.doc.set_attribute(node, name, unescape(&raw))?;
        }
    }

    /// Character data up to the next `<`; dropped outside the root element
    fn parse_text(&mut self) {
        let start = self.scanner.pos();
        while self.scanner.peek().is_some_and(|b| b != b'<') {
            self.scanner.advance();
        }

        let raw = self.scanner.slice_from(start);
        if let Some(node) = self.current() {
            self.doc.append_text(node, &decode_text_entities(raw));
        }
    }

    fn expected(&self, what: &str) -> Error {
        self.scanner
            .error_here(SyntaxError::Expected(what.to_string()))
    }
}
