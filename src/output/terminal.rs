//! Boxed console tables

use std::io::Write;

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::model::Table;

use super::OutputFormatter;

/// Header of the leading row-number column
const INDEX_HEADER: &str = "(index)";

/// Terminal output as a boxed table with a row-number column
pub struct TerminalOutput {
    precision: Option<usize>,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self { precision: None }
    }

    /// Round fractional numbers to `precision` decimals
    pub fn with_precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }

    fn build_rows(&self, table: &Table) -> Vec<Vec<String>> {
        let mut header: Vec<String> = Vec::with_capacity(table.column_count() + 1);
        header.push(INDEX_HEADER.to_string());
        header.extend(table.column_names().map(str::to_string));

        let mut rows = vec![header];
        for i in 0..table.row_count() {
            let mut row: Vec<String> = Vec::with_capacity(table.column_count() + 1);
            row.push(i.to_string());
            row.extend(
                table
                    .columns()
                    .iter()
                    .map(|c| c.values()[i].display_with_precision(self.precision).into_owned()),
            );
            rows.push(row);
        }
        rows
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        if table.column_count() == 0 {
            writeln!(writer, "(empty table)")?;
            return Ok(());
        }

        let mut builder = Builder::default();
        for row in self.build_rows(table) {
            builder.push_record(row);
        }

        let mut display = builder.build();
        display.with(Style::modern());
        writeln!(writer, "{}", display)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellValue, Column};

    fn sample() -> Table {
        Table::from_columns(vec![
            Column::with_values("name", [CellValue::from("setosa"), CellValue::Null]),
            Column::with_values("value", [1.23456, 2.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_rows_with_index() {
        let rows = TerminalOutput::new().with_precision(Some(2)).build_rows(&sample());
        assert_eq!(rows[0], vec!["(index)", "name", "value"]);
        assert_eq!(rows[1], vec!["0", "setosa", "1.23"]);
        assert_eq!(rows[2], vec!["1", "", "2"]);
    }

    #[test]
    fn test_render_contains_cells() {
        let mut out = Vec::new();
        TerminalOutput::new().render(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(INDEX_HEADER));
        assert!(text.contains("setosa"));
        assert!(text.contains("1.23456"));
    }

    #[test]
    fn test_render_empty_table() {
        let mut out = Vec::new();
        TerminalOutput::new()
            .render(&Table::default(), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "(empty table)\n");
    }
}
