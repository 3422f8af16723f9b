//! Table and Cell data structures

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::schema::{CellType, Column};
use crate::error::{Result, StatsError};

/// A single cell: missing, a number, or text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Number(f64),
    Text(Cow<'static, str>),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Number(a), CellValue::Number(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Null => {}
            // 0.0 and -0.0 compare equal, so they must hash alike
            CellValue::Number(n) if *n == 0.0 => 0u64.hash(state),
            CellValue::Number(n) => n.to_bits().hash(state),
            CellValue::Text(s) => s.hash(state),
        }
    }
}

impl CellValue {
    /// Check if the value is missing
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Numeric payload, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text payload, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed(""),
            CellValue::Number(n) => Cow::Owned(n.to_string()),
            CellValue::Text(s) => Cow::Borrowed(s.as_ref()),
        }
    }

    /// Display string with numbers rounded to `precision` decimals
    pub fn display_with_precision(&self, precision: Option<usize>) -> Cow<'_, str> {
        match (self, precision) {
            (CellValue::Number(n), Some(p)) if n.fract() != 0.0 => {
                Cow::Owned(format!("{:.*}", p, n))
            }
            _ => self.display(),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(Cow::Owned(s.to_string()))
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(Cow::Owned(s))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Number(f)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Number(i as f64)
    }
}

impl From<usize> for CellValue {
    fn from(u: usize) -> Self {
        CellValue::Number(u as f64)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

/// A table of named columns with equal length
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Columns in display order
    columns: Vec<Column>,
    /// Number of rows shared by every column
    row_count: usize,
}

impl Table {
    /// Create an empty table with the given column names
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<Column> = names.into_iter().map(Column::new).collect();
        check_unique(&columns)?;
        Ok(Self {
            columns,
            row_count: 0,
        })
    }

    /// Create a table from pre-filled columns
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        check_unique(&columns)?;
        let row_count = columns.first().map(Column::len).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.len() != row_count) {
            return Err(StatsError::LengthMismatch {
                column: bad.name.clone(),
                expected: row_count,
                actual: bad.len(),
            });
        }
        Ok(Self { columns, row_count })
    }

    /// Append one row, values given in column order
    pub fn add_row<I, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let values: Vec<CellValue> = values.into_iter().map(Into::into).collect();
        if values.len() != self.columns.len() {
            return Err(StatsError::ArityMismatch {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        for (column, value) in self.columns.iter_mut().zip(values) {
            column.push(value);
        }
        self.row_count += 1;
        Ok(())
    }

    /// Columns in display order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Column names in display order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a column's values by name
    pub fn get_column(&self, name: &str) -> Result<&[CellValue]> {
        self.require(name).map(Column::values)
    }

    pub(crate) fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| StatsError::UnknownColumn(name.to_string()))
    }

    /// Inferred type per column, in display order
    pub fn dtypes(&self) -> Vec<(&str, CellType)> {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), c.inferred_type()))
            .collect()
    }

    /// Cells of one row in column order
    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        if index >= self.row_count {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values()[index]).collect())
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// New table holding the given rows, in the given order
    pub fn take_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = c.values();
                Column::with_values(
                    c.name.clone(),
                    indices.iter().filter_map(|&i| values.get(i).cloned()),
                )
            })
            .collect();
        Table {
            columns,
            row_count: indices.iter().filter(|&&i| i < self.row_count).count(),
        }
    }

    /// First `n` rows
    pub fn head(&self, n: usize) -> Table {
        let end = n.min(self.row_count);
        self.take_rows(&(0..end).collect::<Vec<_>>())
    }

    /// Last `n` rows
    pub fn tail(&self, n: usize) -> Table {
        let start = self.row_count.saturating_sub(n);
        self.take_rows(&(start..self.row_count).collect::<Vec<_>>())
    }

    /// Project onto the named columns, in the given order
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let columns = names
            .iter()
            .map(|name| self.require(name).cloned())
            .collect::<Result<Vec<_>>>()?;
        check_unique(&columns)?;
        Ok(Table {
            columns,
            row_count: self.row_count,
        })
    }
}

fn check_unique(columns: &[Column]) -> Result<()> {
    let mut seen = FxHashSet::default();
    for column in columns {
        if !seen.insert(column.name.as_str()) {
            return Err(StatsError::DuplicateColumn(column.name.clone()));
        }
    }
    Ok(())
}
