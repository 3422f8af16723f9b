//! Multi-statistic report over the numeric columns of a table

use log::warn;

use crate::model::{CellValue, Column, Table};

use super::numeric;

/// Label of the leading column in a [`describe`] report
pub const STATISTIC_COLUMN: &str = "statistic";

const ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Describe every numeric column: count, mean, std, min, quartiles and max.
///
/// Columns holding any text are left out, as is a column already named
/// [`STATISTIC_COLUMN`]. Statistics undefined for a column
/// (e.g. the std of a single value) are null.
pub fn describe(table: &Table) -> Table {
    let mut columns = vec![Column::with_values(STATISTIC_COLUMN, ROWS)];

    for column in table.columns() {
        if column.name == STATISTIC_COLUMN {
            warn!("column '{}' clashes with the report label and is skipped", column.name);
            continue;
        }
        let Ok(mut data) = column.numbers() else {
            continue;
        };
        data.sort_by(f64::total_cmp);

        let values = [
            Some(data.len() as f64),
            numeric::mean(&data),
            numeric::std_dev(&data),
            data.first().copied(),
            numeric::quantile_sorted(&data, 0.25),
            numeric::quantile_sorted(&data, 0.5),
            numeric::quantile_sorted(&data, 0.75),
            data.last().copied(),
        ];
        columns.push(Column::with_values(
            column.name.clone(),
            values.map(CellValue::from),
        ));
    }

    Table::from_columns(columns)
        .expect("describe columns have unique names and one cell per statistic")
}
