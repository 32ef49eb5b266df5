//! Recursive-descent JSON parser

use indexmap::IndexMap;

use crate::config::ParserConfig;
use crate::cursor::Cursor;
use crate::error::{Error, Location, Result, SyntaxError};
use crate::json::value::Value;

#[derive(Debug)]
pub struct JsonParser<'a> {
    cursor: Cursor<'a>,
    config: ParserConfig,
    depth: usize,
}

impl<'a> JsonParser<'a> {
    pub fn new(input: &'a str) -> Result<Self> {
        Self::with_config(input, ParserConfig::default())
    }

    pub fn with_config(input: &'a str, config: ParserConfig) -> Result<Self> {
        config.validate_input_size(input)?;
        Ok(Self {
            cursor: Cursor::new(input),
            config,
            depth: 0,
        })
    }

    /// Parse exactly one value; anything but whitespace after it is an error
    pub fn parse(&mut self) -> Result<Value> {
        let value = self.parse_value()?;
        self.cursor.skip_whitespace();
        if !self.cursor.is_eof() {
            return Err(self.error_here(SyntaxError::TrailingContent));
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.cursor.skip_whitespace();
        match self.cursor.current() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b't') => self.parse_literal("true", Value::Boolean(true)),
            Some(b'f') => self.parse_literal("false", Value::Boolean(false)),
            Some(b'n') => self.parse_literal("null", Value::Null),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(self.unexpected_character()),
            None => Err(self.error_here(SyntaxError::UnexpectedEof)),
        }
    }

    fn parse_literal(&mut self, word: &str, value: Value) -> Result<Value> {
        if !self.cursor.starts_with(word) {
            return Err(self.error_here(SyntaxError::Expected(format!("'{}'", word))));
        }
        self.cursor.advance_by(word.len());
        Ok(value)
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start_loc = self.cursor.location();
        let start = self.cursor.pos();

        self.cursor.consume(b'-');
        if !self.cursor.consume(b'0') {
            self.expect_digits(start, start_loc)?;
        }
        if self.cursor.consume(b'.') {
            self.expect_digits(start, start_loc)?;
        }
        if matches!(self.cursor.current(), Some(b'e' | b'E')) {
            self.cursor.advance();
            if matches!(self.cursor.current(), Some(b'+' | b'-')) {
                self.cursor.advance();
            }
            self.expect_digits(start, start_loc)?;
        }

        let text = self.cursor.slice_from(start);
        text.parse::<f64>()
            .map(Value::Number)
            .map_err(|_| Self::error_at(start_loc, SyntaxError::InvalidNumber(text.to_string())))
    }

    fn expect_digits(&mut self, start: usize, start_loc: Location) -> Result<()> {
        if !self.cursor.current().is_some_and(|b| b.is_ascii_digit()) {
            let text = self.cursor.slice_from(start).to_string();
            return Err(Self::error_at(start_loc, SyntaxError::InvalidNumber(text)));
        }
        while self.cursor.current().is_some_and(|b| b.is_ascii_digit()) {
            self.cursor.advance();
        }
        Ok(())
    }

    fn parse_string(&mut self) -> Result<String> {
        let opened_at = self.cursor.location();
        self.cursor.advance();

        let mut out = String::new();
        let mut run = self.cursor.pos();
        loop {
            match self.cursor.current() {
                None => {
                    return Err(Self::error_at(
                        opened_at,
                        SyntaxError::Unterminated("string"),
                    ))
                }
                Some(b'"') => {
                    out.push_str(self.cursor.slice_from(run));
                    self.cursor.advance();
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(self.cursor.slice_from(run));
                    self.cursor.advance();
                    out.push(self.parse_escape()?);
                    run = self.cursor.pos();
                }
                Some(b) if b < 0x20 => return Err(self.unexpected_character()),
                Some(_) => self.cursor.advance(),
            }
        }
    }

    fn parse_escape(&mut self) -> Result<char> {
        let Some(b) = self.cursor.current() else {
            return Err(self.error_here(SyntaxError::UnexpectedEof));
        };
        let c = match b {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{0008}',
            b'f' => '\u{000C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => {
                self.cursor.advance();
                return self.parse_unicode_escape();
            }
            _ => {
                let c = self.cursor.remaining().chars().next().unwrap_or('?');
                return Err(self.error_here(SyntaxError::InvalidEscape(c)));
            }
        };
        self.cursor.advance();
        Ok(c)
    }

    /// `XXXX` after `\u`, joining a surrogate pair when one follows
    fn parse_unicode_escape(&mut self) -> Result<char> {
        let at = self.cursor.location();
        let first = self.parse_hex4()?;

        let code = match first {
            0xD800..=0xDBFF => {
                if !self.cursor.starts_with("\\u") {
                    return Err(Self::error_at(at, SyntaxError::InvalidUnicode));
                }
                self.cursor.advance_by(2);
                let second = self.parse_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(Self::error_at(at, SyntaxError::InvalidUnicode));
                }
                0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(Self::error_at(at, SyntaxError::InvalidUnicode)),
            code => code,
        };

        char::from_u32(code).ok_or_else(|| Self::error_at(at, SyntaxError::InvalidUnicode))
    }

    fn parse_hex4(&mut self) -> Result<u32> {
        let at = self.cursor.location();
        let digits = self.cursor.remaining().get(..4).unwrap_or_default();
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Self::error_at(at, SyntaxError::InvalidUnicode));
        }
        self.cursor.advance_by(4);
        u32::from_str_radix(digits, 16).map_err(|_| Self::error_at(at, SyntaxError::InvalidUnicode))
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.enter()?;
        self.cursor.advance();

        let mut items = Vec::new();
        self.cursor.skip_whitespace();
        if self.cursor.consume(b']') {
            self.depth -= 1;
            return Ok(Value::Array(items));
        }

        loop {
            items.push(self.parse_value()?);
            self.cursor.skip_whitespace();
            if self.cursor.consume(b',') {
                continue;
            }
            if self.cursor.consume(b']') {
                break;
            }
            return Err(self.expected("',' or ']'"));
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.enter()?;
        self.cursor.advance();

        let mut map = IndexMap::new();
        self.cursor.skip_whitespace();
        if self.cursor.consume(b'}') {
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            self.cursor.skip_whitespace();
            if self.cursor.current() != Some(b'"') {
                return Err(self.expected("string key"));
            }
            let key = self.parse_string()?;

            self.cursor.skip_whitespace();
            if !self.cursor.consume(b':') {
                return Err(self.expected("':' after key"));
            }

            let value = self.parse_value()?;
            map.insert(key, value);

            self.cursor.skip_whitespace();
            if self.cursor.consume(b',') {
                continue;
            }
            if self.cursor.consume(b'}') {
                break;
            }
            return Err(self.expected("',' or '}'"));
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        let at = self.cursor.location();
        self.config
            .validate_depth(self.depth)
            .map_err(|e| e.with_location(at.line, at.column))
    }

    fn unexpected_character(&self) -> Error {
        let c = self.cursor.remaining().chars().next().unwrap_or('\0');
        self.error_here(SyntaxError::UnexpectedCharacter(c))
    }

    fn expected(&self, what: &str) -> Error {
        self.error_here(SyntaxError::Expected(what.to_string()))
    }

    fn error_here(&self, kind: SyntaxError) -> Error {
        Self::error_at(self.cursor.location(), kind)
    }

    fn error_at(location: Location, kind: SyntaxError) -> Error {
        Error::new(kind).with_location(location.line, location.column)
    }
}
