//! Summary statistics over table columns

mod describe;
mod group;
pub mod numeric;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};
use crate::model::{CellValue, Column, Table};

pub use describe::{describe, STATISTIC_COLUMN};
pub use group::{group_by, GroupBy};

/// Aggregation kind applied to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Count,
    Mean,
    Median,
    Min,
    Max,
    #[serde(rename = "std")]
    StdDev,
}

impl Aggregation {
    /// All aggregation kinds, in report order
    pub const ALL: [Aggregation; 6] = [
        Aggregation::Count,
        Aggregation::Mean,
        Aggregation::Median,
        Aggregation::Min,
        Aggregation::Max,
        Aggregation::StdDev,
    ];
}

impl std::str::FromStr for Aggregation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "count" => Ok(Aggregation::Count),
            "mean" => Ok(Aggregation::Mean),
            "median" => Ok(Aggregation::Median),
            "min" => Ok(Aggregation::Min),
            "max" => Ok(Aggregation::Max),
            "std" | "sd" | "stddev" => Ok(Aggregation::StdDev),
            _ => Err(format!("Unknown aggregation: {}", s)),
        }
    }
}

impl std::fmt::Display for Aggregation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Aggregation::Count => write!(f, "count"),
            Aggregation::Mean => write!(f, "mean"),
            Aggregation::Median => write!(f, "median"),
            Aggregation::Min => write!(f, "min"),
            Aggregation::Max => write!(f, "max"),
            Aggregation::StdDev => write!(f, "std"),
        }
    }
}

/// Aggregate a single column.
///
/// `Ok(None)` only happens for [`Aggregation::StdDev`] with fewer than two
/// values; every other undefined case is an error.
pub fn aggregate(table: &Table, kind: Aggregation, column: &str) -> Result<Option<f64>> {
    aggregate_column(table.require(column)?, kind)
}

/// Aggregate every column into a one-row summary table.
///
/// Fails on the first column the aggregation cannot handle.
pub fn summarize(table: &Table, kind: Aggregation) -> Result<Table> {
    let values = table
        .columns()
        .iter()
        .map(|c| aggregate_column(c, kind).map(CellValue::from))
        .collect::<Result<Vec<_>>>()?;

    // Built row-wise so a table without columns still yields one row
    let mut output = Table::new(table.column_names())?;
    output.add_row(values)?;
    Ok(output)
}

pub(crate) fn aggregate_column(column: &Column, kind: Aggregation) -> Result<Option<f64>> {
    let value = match kind {
        Aggregation::Count => {
            let present = column.values().iter().filter(|c| !c.is_null()).count();
            return Ok(Some(present as f64));
        }
        Aggregation::StdDev => return Ok(numeric::std_dev(&numbers(column)?)),
        Aggregation::Mean => numeric::mean(&numbers(column)?),
        Aggregation::Median => numeric::median(&numbers(column)?),
        Aggregation::Min => numeric::min(&numbers(column)?),
        Aggregation::Max => numeric::max(&numbers(column)?),
    };

    value
        .map(Some)
        .ok_or_else(|| StatsError::EmptyColumn(column.name.clone()))
}

fn numbers(column: &Column) -> Result<Vec<f64>> {
    column.numbers().map_err(|_| StatsError::NotNumeric {
        column: column.name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iris() -> Table {
        Table::from_columns(vec![
            Column::with_values("SepalLength", [5.1, 4.9, 4.7]),
            Column::with_values("Species", ["setosa", "setosa", "versicolor"]),
        ])
        .unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_parse_aggregation() {
        assert_eq!("mean".parse::<Aggregation>(), Ok(Aggregation::Mean));
        assert_eq!("SD".parse::<Aggregation>(), Ok(Aggregation::StdDev));
        assert!("mode".parse::<Aggregation>().is_err());
        for kind in Aggregation::ALL {
            assert_eq!(kind.to_string().parse::<Aggregation>(), Ok(kind));
        }
    }

    #[test]
    fn test_single_column_stats() {
        let table = iris();
        let mean = aggregate(&table, Aggregation::Mean, "SepalLength").unwrap().unwrap();
        assert!(close(mean, 4.9));
        assert_eq!(
            aggregate(&table, Aggregation::Median, "SepalLength").unwrap(),
            Some(4.9)
        );
        assert_eq!(aggregate(&table, Aggregation::Min, "SepalLength").unwrap(), Some(4.7));
        assert_eq!(aggregate(&table, Aggregation::Max, "SepalLength").unwrap(), Some(5.1));
        let sd = aggregate(&table, Aggregation::StdDev, "SepalLength").unwrap().unwrap();
        assert!(close(sd, 0.2));
    }

    #[test]
    fn test_count_includes_zero_and_text() {
        let table = Table::from_columns(vec![
            Column::with_values("n", [CellValue::Number(0.0), CellValue::Null, CellValue::Number(2.0)]),
            Column::with_values("t", [CellValue::from("a"), CellValue::from(""), CellValue::Null]),
        ])
        .unwrap();
        assert_eq!(aggregate(&table, Aggregation::Count, "n").unwrap(), Some(2.0));
        assert_eq!(aggregate(&table, Aggregation::Count, "t").unwrap(), Some(2.0));
    }

    #[test]
    fn test_errors() {
        let table = iris();
        assert_eq!(
            aggregate(&table, Aggregation::Mean, "Petal").unwrap_err(),
            StatsError::UnknownColumn("Petal".to_string())
        );
        assert_eq!(
            aggregate(&table, Aggregation::Mean, "Species").unwrap_err(),
            StatsError::NotNumeric {
                column: "Species".to_string()
            }
        );

        let empty = Table::new(["X"]).unwrap();
        assert_eq!(
            aggregate(&empty, Aggregation::Mean, "X").unwrap_err(),
            StatsError::EmptyColumn("X".to_string())
        );
        assert_eq!(aggregate(&empty, Aggregation::StdDev, "X").unwrap(), None);
        assert_eq!(aggregate(&empty, Aggregation::Count, "X").unwrap(), Some(0.0));
    }

    #[test]
    fn test_nulls_are_skipped() {
        let table = Table::from_columns(vec![Column::with_values(
            "x",
            [CellValue::Number(1.0), CellValue::Null, CellValue::Number(3.0)],
        )])
        .unwrap();
        assert_eq!(aggregate(&table, Aggregation::Mean, "x").unwrap(), Some(2.0));
        assert_eq!(aggregate(&table, Aggregation::Median, "x").unwrap(), Some(2.0));
    }

    #[test]
    fn test_summarize_fails_fast() {
        let table = iris();
        assert_eq!(
            summarize(&table, Aggregation::Mean).unwrap_err(),
            StatsError::NotNumeric {
                column: "Species".to_string()
            }
        );

        let counts = summarize(&table, Aggregation::Count).unwrap();
        assert_eq!(counts.row_count(), 1);
        assert_eq!(
            counts.column_names().collect::<Vec<_>>(),
            vec!["SepalLength", "Species"]
        );
        assert_eq!(counts.get_column("Species").unwrap()[0], CellValue::Number(3.0));
    }

    #[test]
    fn test_summarize_without_columns_has_one_row() {
        let table = Table::new(Vec::<String>::new()).unwrap();
        let summary = summarize(&table, Aggregation::Count).unwrap();
        assert_eq!(summary.row_count(), 1);
        assert_eq!(summary.column_count(), 0);
    }

    #[test]
    fn test_summarize_std_dev_undefined_is_null() {
        let table = Table::from_columns(vec![
            Column::with_values("a", [1.0]),
            Column::with_values("b", [2.0]),
        ])
        .unwrap();
        let summary = summarize(&table, Aggregation::StdDev).unwrap();
        assert_eq!(summary.row_count(), 1);
        assert_eq!(summary.get_column("a").unwrap()[0], CellValue::Null);
    }
}
