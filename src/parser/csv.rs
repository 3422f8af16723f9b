//! CSV and TSV file parser

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::config::Config;
use crate::model::{raw_cell, CellValue, Table};

use super::Parser;

/// Parser for delimited text files
pub struct CsvParser;

impl CsvParser {
    /// Read a delimited table from any reader; every field stays raw text
    pub fn parse_reader<R: Read>(&self, reader: R, delimiter: u8) -> Result<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader);

        // Read headers
        let headers = csv_reader
            .headers()
            .context("Failed to read CSV headers")?
            .clone();

        let mut table =
            Table::new(headers.iter().map(str::to_string)).context("Invalid CSV header")?;
        let width = table.column_count();

        // Read rows
        for (line_num, result) in csv_reader.records().enumerate() {
            let record = result.with_context(|| format!("Failed to read CSV row {}", line_num + 2))?; // +2 for 1-indexing and header

            let mut cells: Vec<CellValue> = record.iter().map(raw_cell).collect();

            // Pad short rows with nulls, drop extra fields
            if cells.len() != width {
                warn!(
                    "row {} has {} fields, expected {}",
                    line_num + 2,
                    cells.len(),
                    width
                );
                cells.resize(width, CellValue::Null);
            }

            table
                .add_row(cells)
                .with_context(|| format!("Failed to add CSV row {}", line_num + 2))?;
        }

        Ok(table)
    }
}

impl Parser for CsvParser {
    fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        let delimiter = config
            .delimiter
            .unwrap_or_else(|| default_delimiter(path));
        debug!(
            "reading {} with delimiter {:?}",
            path.display(),
            delimiter as char
        );
        self.parse_reader(BufReader::new(file), delimiter)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "tab" | "txt")
    }
}

/// Tab for `.tsv`/`.tab` files, comma otherwise
fn default_delimiter(path: &Path) -> u8 {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("tsv") | Some("tab") => b'\t',
        _ => b',',
    }
}
