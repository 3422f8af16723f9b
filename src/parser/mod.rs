//! Loaders turning files into raw-text tables

mod csv;

use std::path::Path;

use anyhow::{bail, Result};
use log::info;

use crate::config::Config;
use crate::model::Table;

pub use self::csv::CsvParser;

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path, config: &Config) -> Result<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for creating parsers based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(CsvParser)],
        }
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        for parser in &self.parsers {
            if parser.supports_extension(&ext) {
                return Ok(parser.as_ref());
            }
        }

        bail!(
            "Unsupported file format: {}",
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
        )
    }

    /// Parse a file using the appropriate parser, inferring types if configured
    pub fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let parser = self.get_parser(path)?;
        let mut table = parser.parse(path, config)?;

        info!(
            "loaded {} rows x {} columns from {}",
            table.row_count(),
            table.column_count(),
            path.display()
        );

        if config.infer_types {
            let converted = table.infer_types();
            info!("{} of {} columns inferred as numeric", converted, table.column_count());
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_parser_by_extension() {
        let factory = ParserFactory::new();
        assert!(factory.get_parser(Path::new("iris.csv")).is_ok());
        assert!(factory.get_parser(Path::new("iris.TSV")).is_ok());
        assert!(factory.get_parser(Path::new("iris.parquet")).is_err());
        assert!(factory.get_parser(Path::new("iris")).is_err());
    }
}
