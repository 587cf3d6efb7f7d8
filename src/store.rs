//! Column-indexed, read-only view of the tabular data source.

use std::collections::HashMap;

use thiserror::Error;

/// Lookup errors raised by [`ColumnStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}

/// Mapping from column header to the non-empty cells of that column.
///
/// Every header of the source appears as a key, even when its column has no
/// values. Values keep file row order and duplicates are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnStore {
    headers: Vec<String>,
    columns: HashMap<String, Vec<String>>,
}

impl ColumnStore {
    /// Build a store from a header row and the data rows that follow it.
    ///
    /// Cells are trimmed and empty cells dropped. Rows shorter than the
    /// header leave the missing cells empty; surplus cells are ignored.
    /// A header that repeats collects the values of every column it names.
    pub fn from_rows<I>(headers: Vec<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut columns: HashMap<String, Vec<String>> = HashMap::with_capacity(headers.len());
        for header in &headers {
            columns.entry(header.clone()).or_default();
        }

        for row in rows {
            for (header, cell) in headers.iter().zip(row.iter()) {
                let cell = cell.trim();
                if cell.is_empty() {
                    continue;
                }
                if let Some(values) = columns.get_mut(header) {
                    values.push(cell.to_string());
                }
            }
        }

        Self { headers, columns }
    }

    /// Build a store directly from `(header, values)` pairs.
    #[cfg(test)]
    pub fn from_columns<H, V>(columns: impl IntoIterator<Item = (H, Vec<V>)>) -> Self
    where
        H: Into<String>,
        V: Into<String>,
    {
        let mut headers = Vec::new();
        let mut map = HashMap::new();
        for (header, values) in columns {
            let header = header.into();
            let values: Vec<String> = values
                .into_iter()
                .map(Into::into)
                .filter(|v: &String| !v.trim().is_empty())
                .collect();
            headers.push(header.clone());
            map.insert(header, values);
        }
        Self {
            headers,
            columns: map,
        }
    }

    /// Values of a column, in row order.
    pub fn values(&self, header: &str) -> Result<&[String], StoreError> {
        self.columns
            .get(header)
            .map(Vec::as_slice)
            .ok_or_else(|| StoreError::UnknownColumn(header.to_string()))
    }

    /// Column headers in file order (duplicates included).
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}
