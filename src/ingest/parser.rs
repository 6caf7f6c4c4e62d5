//! Delimited-text parsing into generic field mappings

use std::collections::HashMap;
use tracing::debug;

use crate::types::*;

/// One data row: normalized header name -> trimmed cell value
pub type FieldMap = HashMap<String, String>;

/// Splits header-first delimited text into field mappings
///
/// Plain delimiter splitting only: a quoted cell containing the delimiter is
/// split like any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabularParser {
    delimiter: char,
}

impl Default for TabularParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TabularParser {
    /// Create a comma-delimited parser
    pub fn new() -> Self {
        Self { delimiter: ',' }
    }

    /// Create a parser for another single-character delimiter
    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Field delimiter this parser splits on
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Parse text whose first non-empty line is the header
    ///
    /// Blank lines are skipped. Short rows are padded with empty strings,
    /// cells past the last header are dropped. Text with no header line at
    /// all is an error; a header with no data rows is an empty, valid result.
    pub fn parse(&self, content: &str) -> ReconcileResult<Vec<FieldMap>> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut lines = content.lines().filter(|line| !line.trim().is_empty());

        let header_line = lines.next().ok_or(ReconcileError::EmptyInput)?;
        let headers: Vec<String> = header_line
            .split(self.delimiter)
            .map(normalize_header)
            .collect();

        let rows: Vec<FieldMap> = lines
            .map(|line| {
                let mut cells = line.split(self.delimiter);
                headers
                    .iter()
                    .map(|header| {
                        let value = cells.next().map(str::trim).unwrap_or_default();
                        (header.clone(), value.to_string())
                    })
                    .collect()
            })
            .collect();

        debug!(
            columns = headers.len(),
            rows = rows.len(),
            "Parsed delimited input"
        );

        Ok(rows)
    }
}

/// Lowercase a header and collapse each whitespace run into `_`
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}
