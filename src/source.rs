//! Loading the semicolon-delimited data file into a [`ColumnStore`].
//!
//! The file is read in one go and decoded with a legacy single-byte
//! encoding (Windows-1252 unless configured otherwise). Undecodable bytes
//! become U+FFFD instead of failing the load. A UTF-8 byte-order mark
//! overrides the configured encoding.

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use thiserror::Error;

use crate::store::ColumnStore;

/// Default data file, relative to the working directory.
pub const DEFAULT_SOURCE: &str = "Account generation.csv";

/// Encoding label tried first when decoding the data file.
pub const DEFAULT_ENCODING: &str = "windows-1252";

const DELIMITER: char = ';';
const QUOTE: char = '"';

/// Failures while loading the data file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("data file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("data file {} could not be read: {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("data file {} has no header row", .0.display())]
    Empty(PathBuf),
}

/// Load the data file, decoding it with the encoding named by `label`.
pub fn load_with_encoding(path: &Path, label: &str) -> Result<ColumnStore, SourceError> {
    if !path.exists() {
        return Err(SourceError::Missing(path.to_path_buf()));
    }

    let encoding =
        Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| SourceError::Unreadable {
            path: path.to_path_buf(),
            reason: format!("unknown encoding '{label}'"),
        })?;

    let bytes = std::fs::read(path).map_err(|e| SourceError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let text = decode(&bytes, encoding);
    let store = parse(&text).ok_or_else(|| SourceError::Empty(path.to_path_buf()))?;

    tracing::debug!(
        "Loaded {} columns from {}",
        store.headers().len(),
        path.display()
    );
    Ok(store)
}

fn decode(bytes: &[u8], fallback: &'static Encoding) -> String {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((bom_encoding, bom_len)) => (bom_encoding, &bytes[bom_len..]),
        None => (fallback, bytes),
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        tracing::debug!(
            "Replaced undecodable bytes while reading as {}",
            encoding.name()
        );
    }
    text.into_owned()
}

/// Parse decoded text into a store. Returns `None` when there is no usable
/// header row.
fn parse(text: &str) -> Option<ColumnStore> {
    let mut records = split_records(text).into_iter();

    let headers: Vec<String> = records
        .next()?
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(String::is_empty) {
        return None;
    }

    Some(ColumnStore::from_rows(headers, records))
}

/// Split text into records of raw cells.
///
/// A cell opening with `"` is quoted: delimiters and line breaks inside it
/// are literal and `""` stands for one quote character.
fn split_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                QUOTE if chars.peek() == Some(&QUOTE) => {
                    chars.next();
                    field.push(QUOTE);
                }
                QUOTE => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            QUOTE if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            DELIMITER => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn load(path: &Path) -> Result<ColumnStore, SourceError> {
        load_with_encoding(path, DEFAULT_ENCODING)
    }

    fn write_source(dir: &TempDir, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(DEFAULT_SOURCE);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load(&dir.path().join("nope.csv"));
        assert!(matches!(result, Err(SourceError::Missing(_))));
    }

    #[test]
    fn empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, b"");
        assert!(matches!(load(&path), Err(SourceError::Empty(_))));

        let path = write_source(&dir, b" ; \n");
        assert!(matches!(load(&path), Err(SourceError::Empty(_))));
    }

    #[test]
    fn unknown_encoding_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, b"A;B\n");
        let result = load_with_encoding(&path, "klingon-8");
        assert!(matches!(result, Err(SourceError::Unreadable { .. })));
    }

    #[test]
    fn header_only_file_has_empty_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, b"Prompts;Alerts\n");
        let store = load(&path).unwrap();

        assert!(store.values("Prompts").unwrap().is_empty());
        assert!(store.values("Alerts").unwrap().is_empty());
    }

    #[test]
    fn headers_are_trimmed_and_cells_stripped() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, b" Alerts ; Appender\r\n  a ;buy\r\nb;\r\n;sell\r\n");
        let store = load(&path).unwrap();

        assert_eq!(store.headers(), &["Alerts", "Appender"]);
        assert_eq!(store.values("Alerts").unwrap(), &["a", "b"]);
        assert_eq!(store.values("Appender").unwrap(), &["buy", "sell"]);
    }

    #[test]
    fn duplicates_are_preserved() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, b"A\nx\nx\ny\n");
        let store = load(&path).unwrap();
        assert_eq!(store.values("A").unwrap(), &["x", "x", "y"]);
    }

    #[test]
    fn quoted_cells_keep_delimiters() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, b"A;B\n\"one; two\";\"say \"\"hi\"\"\"\n");
        let store = load(&path).unwrap();
        assert_eq!(store.values("A").unwrap(), &["one; two"]);
        assert_eq!(store.values("B").unwrap(), &["say \"hi\""]);
    }

    #[test]
    fn legacy_bytes_are_decoded() {
        let dir = TempDir::new().unwrap();
        // 0xE9 is 'é' in Windows-1252 and invalid on its own in UTF-8.
        let path = write_source(&dir, b"Words\ncaf\xE9\n");
        let store = load(&path).unwrap();
        assert_eq!(store.values("Words").unwrap(), &["café"]);
    }

    #[test]
    fn utf8_bom_switches_decoding() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, "\u{feff}Words\ncafé\n".as_bytes());
        let store = load(&path).unwrap();
        assert_eq!(store.headers(), &["Words"]);
        assert_eq!(store.values("Words").unwrap(), &["café"]);
    }

    #[test]
    fn loading_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_source(&dir, b"A;B\n1;2\n3;\n");
        assert_eq!(load(&path).unwrap(), load(&path).unwrap());
    }
}
