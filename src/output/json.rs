//! JSON output format

use std::io::Write;

use anyhow::Result;
use indexmap::IndexMap;

use crate::model::{CellValue, Table};

use super::OutputFormatter;

/// JSON output formatter: a pretty-printed array with one object per row
pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_value_to_json(value: &CellValue) -> serde_json::Value {
    match value {
        CellValue::Null => serde_json::Value::Null,
        CellValue::Number(n) => serde_json::json!(*n),
        CellValue::Text(s) => serde_json::Value::String(s.to_string()),
    }
}

/// Row objects with keys in column order
fn records(table: &Table) -> Vec<IndexMap<&str, serde_json::Value>> {
    (0..table.row_count())
        .map(|i| {
            table
                .columns()
                .iter()
                .map(|c| (c.name.as_str(), cell_value_to_json(&c.values()[i])))
                .collect()
        })
        .collect()
}

impl OutputFormatter for JsonOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let output = records(table);

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;

        Ok(())
    }
}
