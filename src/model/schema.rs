//! Column storage and type information

use serde::{Deserialize, Serialize};

use super::table::CellValue;

/// Inferred cell type for a column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    #[default]
    Null,
    Number,
    Text,
    Mixed,
}

impl CellType {
    /// Type of a single cell
    pub fn of(cell: &CellValue) -> CellType {
        match cell {
            CellValue::Null => CellType::Null,
            CellValue::Number(_) => CellType::Number,
            CellValue::Text(_) => CellType::Text,
        }
    }

    /// Widen the type to accommodate another type
    pub fn widen(self, other: CellType) -> CellType {
        if self == other {
            return self;
        }

        match (self, other) {
            (CellType::Null, t) | (t, CellType::Null) => t,
            _ => CellType::Mixed,
        }
    }
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellType::Null => write!(f, "null"),
            CellType::Number => write!(f, "number"),
            CellType::Text => write!(f, "text"),
            CellType::Mixed => write!(f, "mixed"),
        }
    }
}

/// A named column and its values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (from header)
    pub name: String,
    /// Cell values in row order
    values: Vec<CellValue>,
    /// Inferred type from data
    inferred_type: CellType,
}

impl Column {
    /// Create an empty column
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            inferred_type: CellType::Null,
        }
    }

    /// Create a column holding the given values
    pub fn with_values<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let mut column = Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            inferred_type: CellType::Null,
        };
        column.refresh_type();
        column
    }

    /// Cell values in row order
    pub fn values(&self) -> &[CellValue] {
        &self.values
    }

    /// Inferred type of the column
    pub fn inferred_type(&self) -> CellType {
        self.inferred_type
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Numeric cells in row order, skipping nulls.
    ///
    /// Returns the first text cell as an error so callers can report which
    /// column blocked a numeric aggregation.
    pub fn numbers(&self) -> std::result::Result<Vec<f64>, &CellValue> {
        let mut out = Vec::with_capacity(self.values.len());
        for cell in &self.values {
            match cell {
                CellValue::Null => {}
                CellValue::Number(n) => out.push(*n),
                CellValue::Text(_) => return Err(cell),
            }
        }
        Ok(out)
    }

    pub(crate) fn push(&mut self, value: CellValue) {
        self.inferred_type = self.inferred_type.widen(CellType::of(&value));
        self.values.push(value);
    }

    pub(crate) fn replace_values(&mut self, values: Vec<CellValue>) {
        self.values = values;
        self.refresh_type();
    }

    fn refresh_type(&mut self) {
        self.inferred_type = self
            .values
            .iter()
            .fold(CellType::Null, |acc, cell| acc.widen(CellType::of(cell)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widen() {
        assert_eq!(CellType::Null.widen(CellType::Number), CellType::Number);
        assert_eq!(CellType::Text.widen(CellType::Null), CellType::Text);
        assert_eq!(CellType::Number.widen(CellType::Text), CellType::Mixed);
        assert_eq!(CellType::Mixed.widen(CellType::Number), CellType::Mixed);
    }

    #[test]
    fn test_column_type_tracks_pushes() {
        let mut col = Column::new("x");
        assert_eq!(col.inferred_type(), CellType::Null);
        col.push(CellValue::Null);
        col.push(CellValue::Number(1.0));
        assert_eq!(col.inferred_type(), CellType::Number);
        col.push(CellValue::from("a"));
        assert_eq!(col.inferred_type(), CellType::Mixed);
    }

    #[test]
    fn test_numbers_skips_nulls_and_rejects_text() {
        let col = Column::with_values("x", [CellValue::Number(2.0), CellValue::Null]);
        assert_eq!(col.numbers(), Ok(vec![2.0]));

        let col = Column::with_values("x", [CellValue::Number(2.0), CellValue::from("b")]);
        assert_eq!(col.numbers(), Err(&CellValue::from("b")));
    }
}
