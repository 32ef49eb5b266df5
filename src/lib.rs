//! multiformat: CSV, JSON and XML parsing and serialization
//!
//! This crate provides:
//! - An editable XML document tree with a recursive-descent parser that
//!   reports the line and column of the first error, and a serializer with
//!   compact and indented layouts
//! - A JSON value parser and serializer that keeps object key order
//! - A line-oriented CSV reader with header lookup, search and export
//!
//! # Examples
//! ```no_run
//! use multiformat::{parse_file, Parsed, Result};
//!
//! fn example() -> Result<()> {
//!     if let Parsed::Xml(doc) = parse_file("config.xml")? {
//!         println!("root: {:?}", doc.root().and_then(|r| doc.node_name(r)));
//!     }
//!     Ok(())
//! }
//! ```

use tracing::{debug, info, instrument, warn};

pub mod config;
pub mod csv;
pub mod cursor;
pub mod enums;
pub mod error;
pub mod json;
pub mod test_utils;
pub mod utils;
pub mod xml;

// Re-exports
pub use config::{FormatConfig, ParserConfig};
pub use enums::Format;
pub use error::{Error, ErrorKind, Result};
pub use xml::{Document, NodeId, NodeType};

/// Result of [`parse_file`], one variant per format
#[derive(Debug, Clone)]
pub enum Parsed {
    Csv(csv::Table),
    Json(json::Value),
    Xml(Document),
}

impl Parsed {
    pub const fn format(&self) -> Format {
        match self {
            Self::Csv(_) => Format::Csv,
            Self::Json(_) => Format::Json,
            Self::Xml(_) => Format::Xml,
        }
    }
}

/// Parse a file, choosing the format from its extension
#[instrument]
pub fn parse_file(path: &str) -> Result<Parsed> {
    let format = Format::from_path(path).ok_or_else(|| {
        warn!("Unknown file extension");
        Error::new(ErrorKind::UnknownFormat)
    })?;
    parse_file_as(path, format)
}

/// Parse a file as `format`, whatever its extension
pub fn parse_file_as(path: &str, format: Format) -> Result<Parsed> {
    debug!("Starting to parse {} file: {}", format, path);

    let parsed = match format {
        Format::Csv => Parsed::Csv(csv::parse_file(path, &csv::CsvConfig::default())?),
        Format::Json => Parsed::Json(json::parse_file(path)?),
        Format::Xml => Parsed::Xml(xml::parse_file(path)?),
    };

    info!("Parsed {} file", format);
    Ok(parsed)
}
