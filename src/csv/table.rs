use crate::error::Result;
use crate::utils::write_file;

/// Parsed CSV: an optional header line and the data rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Option<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Widest row, header included
    pub fn max_fields(&self) -> usize {
        self.header
            .iter()
            .chain(self.rows.iter())
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    pub fn field_name(&self, index: usize) -> Option<&str> {
        self.header.as_ref()?.get(index).map(String::as_str)
    }

    /// Column position of `name` in the header
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.header.as_ref()?.iter().position(|h| h == name)
    }

    /// Rows whose field at `index` equals `value`
    pub fn count_matches_by_index(&self, index: usize, value: &str) -> usize {
        self.rows
            .iter()
            .filter(|row| row.get(index).is_some_and(|f| f == value))
            .count()
    }

    /// Same as [`count_matches_by_index`](Self::count_matches_by_index) with
    /// the column looked up by name; `None` if there is no such column.
    pub fn count_matches_by_name(&self, name: &str, value: &str) -> Option<usize> {
        self.field_index(name)
            .map(|index| self.count_matches_by_index(index, value))
    }

    /// Write the table back out, header first
    ///
    /// A field is quoted when it contains the delimiter, a double quote, CR
    /// or LF; quotes inside are doubled. Lines end with `\n`.
    pub fn to_csv_string(&self, delimiter: char) -> String {
        let mut out = String::new();
        for row in self.header.iter().chain(self.rows.iter()) {
            for (i, field) in row.iter().enumerate() {
                if i > 0 {
                    out.push(delimiter);
                }
                write_field(&mut out, field, delimiter);
            }
            out.push('\n');
        }
        out
    }

    pub fn export(&self, path: &str, delimiter: char) -> Result<()> {
        write_file(path, &self.to_csv_string(delimiter))
    }
}

fn write_field(out: &mut String, field: &str, delimiter: char) {
    let needs_quotes = field
        .chars()
        .any(|c| c == delimiter || matches!(c, '"' | '\n' | '\r'));
    if needs_quotes {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
