//! Data model for tabular data representation

mod infer;
mod schema;
mod table;

pub use infer::{parse_number, raw_cell};
pub use schema::{CellType, Column};
pub use table::{CellValue, Table};
