//! tabstat - Spreadsheet-style summary statistics for tabular data
//!
//! Owns an in-memory column-oriented [`Table`], converts all-numeric text
//! columns to numbers, and computes count, mean, median, min, max and
//! standard deviation per column, per table, or per group of rows.

pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod stats;

pub use config::Config;
pub use error::{Result, StatsError};
pub use model::{CellValue, Column, Table};
pub use stats::{aggregate, describe, group_by, summarize, Aggregation, GroupBy};
