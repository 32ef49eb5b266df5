//! Line-oriented CSV reader and writer

mod parser;
mod table;

use tracing::{debug, instrument};

pub use self::parser::{parse, parse_line, CsvConfig};
pub use self::table::Table;

use crate::error::Result;
use crate::utils::read_file;

#[instrument]
pub fn parse_file(path: &str, config: &CsvConfig) -> Result<Table> {
    let content = read_file(path)?;
    debug!("Read {} bytes, parsing CSV", content.len());
    parse(&content, config).map_err(|e| e.with_context(format!("in {}", path)))
}
