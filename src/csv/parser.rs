use std::fmt;

use crate::csv::table::Table;
use crate::error::{Location, Result, SyntaxError};

/// CSV dialect and parsing options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvConfig {
    pub delimiter: char,
    pub quote: char,
    /// Strip whitespace around each field (inside quotes is kept)
    pub trim_spaces: bool,
    /// Ignore blank lines
    pub skip_empty: bool,
    /// Treat the first line as column names
    pub has_header: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            trim_spaces: true,
            skip_empty: true,
            has_header: true,
        }
    }
}

impl fmt::Display for CsvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "delimiter={:?}, quote={:?}, trim_spaces={}, skip_empty={}, has_header={}",
            self.delimiter, self.quote, self.trim_spaces, self.skip_empty, self.has_header
        )
    }
}

/// Split one line into fields
///
/// A delimiter inside quotes does not split. A field wrapped in quotes loses
/// them, and a doubled quote inside it stands for one quote. An empty line
/// has no fields.
pub fn parse_line(line: &str, config: &CsvConfig) -> Vec<String> {
    if line.is_empty() {
        return Vec::new();
    }

    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, c) in line.char_indices() {
        if c == config.quote {
            in_quotes = !in_quotes;
        } else if c == config.delimiter && !in_quotes {
            fields.push(clean_field(line.get(start..i).unwrap_or_default(), config));
            start = i + c.len_utf8();
        }
    }
    fields.push(clean_field(line.get(start..).unwrap_or_default(), config));
    fields
}

fn clean_field(raw: &str, config: &CsvConfig) -> String {
    let field = if config.trim_spaces { raw.trim() } else { raw };

    let quote = config.quote;
    let unquoted = field
        .strip_prefix(quote)
        .and_then(|f| f.strip_suffix(quote));
    match unquoted {
        Some(inner) => {
            let mut doubled = String::with_capacity(2);
            doubled.push(quote);
            doubled.push(quote);
            inner.replace(&doubled, &quote.to_string())
        }
        None => field.to_string(),
    }
}

/// Parse a whole CSV document
///
/// Lines end at `\n` with an optional `\r`. Quoted fields cannot span lines.
pub fn parse(input: &str, config: &CsvConfig) -> Result<Table> {
    let mut lines = input
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !config.skip_empty || !line.trim().is_empty());

    let header = if config.has_header {
        let line = lines
            .next()
            .filter(|l| !l.is_empty())
            .ok_or_else(|| {
                Location::new(1, 1)
                    .create_error(SyntaxError::MissingHeader.into(), "CSV input is empty")
            })?;
        Some(parse_line(line, config))
    } else {
        None
    };

    let mut rows: Vec<Vec<String>> = lines.map(|line| parse_line(line, config)).collect();
    // `split` yields a trailing empty piece for input ending in a newline
    if rows.last().is_some_and(Vec::is_empty) && input.ends_with('\n') {
        rows.pop();
    }

    Ok(Table::new(header, rows))
}
