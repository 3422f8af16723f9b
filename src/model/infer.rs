//! Whole-column type inference

use std::borrow::Cow;

use log::debug;

use super::table::{CellValue, Table};

/// Parse a text cell as a finite number
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

impl Table {
    /// Convert every column whose text cells all parse as numbers.
    ///
    /// A column with any unparseable text cell is left exactly as it was.
    /// Null cells stay null and never block a conversion. Returns the number
    /// of columns that changed.
    pub fn infer_types(&mut self) -> usize {
        let mut converted = 0;

        for column in self.columns_mut() {
            if !column.values().iter().any(|c| matches!(c, CellValue::Text(_))) {
                continue;
            }

            // Validate the whole column before committing anything
            let parsed: Option<Vec<CellValue>> = column
                .values()
                .iter()
                .map(|cell| match cell {
                    CellValue::Text(s) => parse_number(s).map(CellValue::Number),
                    other => Some(other.clone()),
                })
                .collect();

            match parsed {
                Some(values) => {
                    debug!("column '{}' converted to numbers", column.name);
                    column.replace_values(values);
                    converted += 1;
                }
                None => debug!("column '{}' left as text", column.name),
            }
        }

        converted
    }
}

/// Raw text cell as produced by a loader: empty fields become null
pub fn raw_cell(field: &str) -> CellValue {
    if field.trim().is_empty() {
        CellValue::Null
    } else {
        CellValue::Text(Cow::Owned(field.to_string()))
    }
}
