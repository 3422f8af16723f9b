//! CSV output format

use std::io::Write;

use anyhow::{Context, Result};

use crate::model::Table;

use super::OutputFormatter;

/// Comma-separated output with a header row; nulls are empty fields
pub struct CsvOutput;

impl CsvOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for CsvOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(table.column_names())
            .context("Failed to write CSV header")?;

        for i in 0..table.row_count() {
            csv_writer
                .write_record(table.columns().iter().map(|c| c.values()[i].display().into_owned()))
                .with_context(|| format!("Failed to write CSV row {}", i + 1))?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
