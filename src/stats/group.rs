//! Grouping rows by the value of a key column

use indexmap::IndexMap;
use log::debug;
use rustc_hash::FxBuildHasher;

use crate::error::{Result, StatsError};
use crate::model::{CellValue, Column, Table};

use super::{aggregate_column, Aggregation};

/// Rows of a table partitioned by key value, in first-seen key order
#[derive(Debug)]
pub struct GroupBy<'a> {
    table: &'a Table,
    key_index: usize,
    partitions: IndexMap<CellValue, Vec<usize>, FxBuildHasher>,
}

/// Partition the rows of `table` by the value in column `key`.
///
/// Null keys form a group of their own.
pub fn group_by<'a>(table: &'a Table, key: &str) -> Result<GroupBy<'a>> {
    let key_index = table
        .column_index(key)
        .ok_or_else(|| StatsError::UnknownColumn(key.to_string()))?;

    let mut partitions: IndexMap<CellValue, Vec<usize>, FxBuildHasher> = IndexMap::default();
    for (row, value) in table.columns()[key_index].values().iter().enumerate() {
        partitions.entry(value.clone()).or_default().push(row);
    }

    debug!(
        "grouped {} rows by '{}' into {} groups",
        table.row_count(),
        key,
        partitions.len()
    );

    Ok(GroupBy {
        table,
        key_index,
        partitions,
    })
}

impl<'a> GroupBy<'a> {
    /// Name of the key column
    pub fn key(&self) -> &str {
        &self.table.columns()[self.key_index].name
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Distinct keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &CellValue> {
        self.partitions.keys()
    }

    /// Row count of each group
    pub fn sizes(&self) -> impl Iterator<Item = (&CellValue, usize)> {
        self.partitions.iter().map(|(k, rows)| (k, rows.len()))
    }

    /// Each key with the sub-table of its rows
    pub fn groups(&self) -> impl Iterator<Item = (&CellValue, Table)> + '_ {
        self.partitions
            .iter()
            .map(|(k, rows)| (k, self.table.take_rows(rows)))
    }

    /// Aggregate every non-key column per group, one output row per key.
    ///
    /// The key column comes first, followed by the remaining columns in
    /// source order. Fails on the first column the aggregation cannot handle.
    pub fn aggregate(&self, kind: Aggregation) -> Result<Table> {
        let mut names = vec![self.key()];
        names.extend(
            self.table
                .column_names()
                .enumerate()
                .filter(|&(i, _)| i != self.key_index)
                .map(|(_, name)| name),
        );
        let mut output = Table::new(names)?;

        for (key, sub_table) in self.groups() {
            let mut row = Vec::with_capacity(output.column_count());
            row.push(key.clone());
            for (i, column) in sub_table.columns().iter().enumerate() {
                if i == self.key_index {
                    continue;
                }
                row.push(CellValue::from(aggregate_column(column, kind)?));
            }
            output.add_row(row)?;
        }

        Ok(output)
    }

    /// Like [`GroupBy::aggregate`] but for a single value column
    pub fn aggregate_column(&self, kind: Aggregation, column: &str) -> Result<Table> {
        let value_index = self
            .table
            .column_index(column)
            .ok_or_else(|| StatsError::UnknownColumn(column.to_string()))?;

        let mut keys = Vec::with_capacity(self.len());
        let mut values = Vec::with_capacity(self.len());
        let cells = self.table.columns()[value_index].values();
        for (key, rows) in &self.partitions {
            let group = Column::with_values(column, rows.iter().map(|&r| cells[r].clone()));
            keys.push(key.clone());
            values.push(CellValue::from(aggregate_column(&group, kind)?));
        }

        // Aggregating the key itself: name the value column after the statistic
        let value_name = if value_index == self.key_index {
            kind.to_string()
        } else {
            column.to_string()
        };
        Table::from_columns(vec![
            Column::with_values(self.key(), keys),
            Column::with_values(value_name, values),
        ])
    }
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

    fn close(a: &CellValue, b: f64) -> bool {
        a.as_number().map(|a| (a - b).abs() < 1e-9).unwrap_or(false)
    }

    #[test]
    fn test_group_mean() {
        let table = iris();
        let groups = group_by(&table, "Species").unwrap();
        assert_eq!(groups.len(), 2);

        let means = groups.aggregate(Aggregation::Mean).unwrap();
        assert_eq!(
            means.column_names().collect::<Vec<_>>(),
            vec!["Species", "SepalLength"]
        );
        assert_eq!(means.row_count(), 2);

        let species = means.get_column("Species").unwrap();
        let sepal = means.get_column("SepalLength").unwrap();
        assert_eq!(species[0], CellValue::from("setosa"));
        assert!(close(&sepal[0], 5.0));
        assert_eq!(species[1], CellValue::from("versicolor"));
        assert!(close(&sepal[1], 4.7));
    }

    #[test]
    fn test_first_seen_order_and_sizes() {
        let table = Table::from_columns(vec![
            Column::with_values("k", ["b", "a", "b", "c", "a"]),
            Column::with_values("v", [1.0, 2.0, 3.0, 4.0, 5.0]),
        ])
        .unwrap();
        let groups = group_by(&table, "k").unwrap();

        let keys: Vec<_> = groups.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);

        let total: usize = groups.sizes().map(|(_, n)| n).sum();
        assert_eq!(total, table.row_count());

        let (key, sub) = groups.groups().next().unwrap();
        assert_eq!(key, &CellValue::from("b"));
        assert_eq!(
            sub.get_column("v").unwrap(),
            &[CellValue::Number(1.0), CellValue::Number(3.0)]
        );
    }

    #[test]
    fn test_null_keys_form_a_group() {
        let table = Table::from_columns(vec![
            Column::with_values("k", [CellValue::Null, CellValue::from("a"), CellValue::Null]),
            Column::with_values("v", [1.0, 2.0, 3.0]),
        ])
        .unwrap();
        let counts = group_by(&table, "k").unwrap().aggregate(Aggregation::Count).unwrap();
        assert_eq!(counts.row_count(), 2);
        assert_eq!(counts.get_column("k").unwrap()[0], CellValue::Null);
        assert_eq!(counts.get_column("v").unwrap()[0], CellValue::Number(2.0));
    }

    #[test]
    fn test_group_errors() {
        let table = iris();
        assert_eq!(
            group_by(&table, "Nope").unwrap_err(),
            StatsError::UnknownColumn("Nope".to_string())
        );

        let mut with_text = iris();
        with_text.add_row([CellValue::from(1.0), CellValue::from("setosa")]).unwrap();
        let table = Table::from_columns(vec![
            with_text.columns()[0].clone(),
            with_text.columns()[1].clone(),
            Column::with_values("Note", ["a", "b", "c", "d"]),
        ])
        .unwrap();
        let groups = group_by(&table, "Species").unwrap();
        assert_eq!(
            groups.aggregate(Aggregation::Mean).unwrap_err(),
            StatsError::NotNumeric {
                column: "Note".to_string()
            }
        );
    }

    #[test]
    fn test_aggregate_single_column() {
        let table = iris();
        let groups = group_by(&table, "Species").unwrap();
        let max = groups.aggregate_column(Aggregation::Max, "SepalLength").unwrap();
        assert_eq!(max.column_count(), 2);
        assert_eq!(max.get_column("SepalLength").unwrap()[0], CellValue::Number(5.1));
        assert!(groups.aggregate_column(Aggregation::Max, "Nope").is_err());

        let counts = groups.aggregate_column(Aggregation::Count, "Species").unwrap();
        assert_eq!(
            counts.column_names().collect::<Vec<_>>(),
            vec!["Species", "count"]
        );
        assert_eq!(counts.get_column("count").unwrap()[0], CellValue::Number(2.0));
    }
}
