use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info, warn};

const TEXT_COLUMN: &str = "text";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No header row found")]
    NoHeader,

    #[error("No rows could be parsed")]
    Empty,
}

/// Column-oriented view over a loaded dataset file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of the `text` column, or of the first column when there is none.
    #[must_use]
    pub fn text_values(&self) -> Vec<String> {
        let index = self
            .columns
            .iter()
            .position(|c| c == TEXT_COLUMN)
            .unwrap_or(0);
        self.rows
            .iter()
            .map(|row| row.get(index).cloned().unwrap_or_default())
            .collect()
    }
}

/// Load a dataset file, falling back through progressively looser formats.
///
/// 1. comma-separated UTF-8 with a header row (an empty result counts as failure)
/// 2. tab-separated Latin-1 with a header row
/// 3. one record per non-blank line in a single `text` column
///
/// Rows with more fields than the header are skipped, shorter rows are padded
/// with empty fields. Never fails: when every strategy fails the
/// reason is logged and an empty table is returned.
pub fn load_table(path: impl AsRef<Path>) -> Table {
    let path = path.as_ref();
    info!("Loading data from {}...", path.display());

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(source) => {
            let err = LoadError::Io {
                path: path.to_path_buf(),
                source,
            };
            error!("Failed to load {}: {err}", path.display());
            return Table::empty();
        }
    };

    match parse_comma_utf8(&bytes) {
        Ok(table) => return table,
        Err(e) => warn!("{}: comma-separated parse failed ({e}), retrying as tab-separated", path.display()),
    }

    match parse_tab_latin1(&bytes) {
        Ok(table) => return table,
        Err(e) => warn!("{}: tab-separated parse failed ({e}), falling back to plain lines", path.display()),
    }

    match parse_lines_latin1(&bytes) {
        Ok(table) => table,
        Err(e) => {
            error!("Failed to load {}: {e}", path.display());
            Table::empty()
        }
    }
}

fn parse_comma_utf8(bytes: &[u8]) -> Result<Table, LoadError> {
    let content = String::from_utf8(bytes.to_vec())?;
    let table = parse_delimited(&content, b',')?;
    if table.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(table)
}

fn parse_tab_latin1(bytes: &[u8]) -> Result<Table, LoadError> {
    parse_delimited(&decode_latin1(bytes), b'\t')
}

fn parse_lines_latin1(bytes: &[u8]) -> Result<Table, LoadError> {
    let rows = decode_latin1(bytes)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| vec![line.to_string()])
        .collect();
    Ok(Table::new(vec![TEXT_COLUMN.to_string()], rows))
}

fn parse_delimited(content: &str, delimiter: u8) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .quote(b'"')
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if columns.is_empty() {
        return Err(LoadError::NoHeader);
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        match record {
            Ok(record) if record.len() > columns.len() => {
                skipped += 1;
                debug!(
                    "Skipping row with {} fields, header has {}",
                    record.len(),
                    columns.len()
                );
            }
            Ok(record) => {
                // Short rows are kept; missing trailing fields read as empty.
                let mut row: Vec<String> = record.iter().map(str::to_string).collect();
                row.resize(columns.len(), String::new());
                rows.push(row);
            }
            Err(e) => {
                skipped += 1;
                debug!("Skipping malformed row: {e}");
            }
        }
    }
    if skipped > 0 {
        warn!("Skipped {skipped} malformed rows");
    }

    Ok(Table::new(columns, rows))
}

/// Every byte maps to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_comma_separated_with_text_column() {
        let file = write_file(
            b"title,text,subject\nA,\"Body, with comma\",news\nB,Second body,politics\n",
        );
        let table = load_table(file.path());
        assert_eq!(table.columns(), ["title", "text", "subject"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.text_values(), vec!["Body, with comma", "Second body"]);
    }

    #[test]
    fn skips_rows_with_extra_fields() {
        let file = write_file(b"title,text\nA,good\nB,bad,extra\nC,also good\n");
        let table = load_table(file.path());
        assert_eq!(table.text_values(), vec!["good", "also good"]);
    }

    #[test]
    fn pads_rows_with_too_few_fields() {
        let file = write_file(
            b"title,text,subject,date\nA,first body,news,today\nB,second body,news\n",
        );
        let table = load_table(file.path());
        assert_eq!(table.len(), 2);
        assert_eq!(table.text_values(), vec!["first body", "second body"]);
    }

    #[test]
    fn all_short_rows_stay_in_the_comma_parse() {
        let file = write_file(b"title,text,subject,date\nA,first body,news\nB,second body\n");
        let table = load_table(file.path());
        assert_eq!(table.columns(), ["title", "text", "subject", "date"]);
        assert_eq!(table.text_values(), vec!["first body", "second body"]);
    }

    #[test]
    fn falls_back_to_first_column_without_text_header() {
        let file = write_file(b"body,label\nfirst,x\nsecond,y\n");
        let table = load_table(file.path());
        assert_eq!(table.text_values(), vec!["first", "second"]);
    }

    #[test]
    fn invalid_utf8_retries_as_tab_separated_latin1() {
        let file = write_file(b"text\tsubject\ncaf\xe9 story\tnews\n");
        let table = load_table(file.path());
        assert_eq!(table.columns(), ["text", "subject"]);
        assert_eq!(table.text_values(), vec!["caf\u{e9} story"]);
    }

    #[test]
    fn header_only_csv_falls_through_to_tab_parse() {
        let file = write_file(b"text\n");
        let table = load_table(file.path());
        assert_eq!(table.columns(), ["text"]);
        assert!(table.is_empty());
    }

    #[test]
    fn plain_lines_become_text_records() {
        let lines = parse_lines_latin1(b"  first line \n\n   \nsecond line\n").unwrap();
        assert_eq!(lines.columns(), ["text"]);
        assert_eq!(lines.text_values(), vec!["first line", "second line"]);
    }

    #[test]
    fn empty_file_yields_empty_table() {
        let file = write_file(b"");
        assert!(load_table(file.path()).is_empty());
    }

    #[test]
    fn missing_file_yields_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let table = load_table(dir.path().join("does-not-exist.csv"));
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn latin1_decoding_maps_bytes_to_code_points() {
        assert_eq!(decode_latin1(b"na\xefve \xa3"), "na\u{ef}ve \u{a3}");
    }
}
