//! Configuration handling for tabstat

use std::path::PathBuf;

use crate::stats::Aggregation;

/// Output format for rendered tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Csv,
}

/// What to compute from the loaded table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Report {
    /// Multi-statistic report over numeric columns
    #[default]
    Describe,
    /// A single aggregation
    Aggregate(Aggregation),
    /// The table itself
    Print,
    /// Inferred type of each column
    Types,
}

/// Configuration for a tabstat run
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the input file
    pub input_file: PathBuf,
    /// Field delimiter; derived from the file extension when unset
    pub delimiter: Option<u8>,
    /// Convert all-numeric text columns to numbers after loading
    pub infer_types: bool,
    /// What to compute
    pub report: Report,
    /// Restrict the report to one column
    pub column: Option<String>,
    /// Column whose values partition the rows
    pub group_by: Option<String>,
    /// Keep only the first N rows
    pub head: Option<usize>,
    /// Keep only the last N rows
    pub tail: Option<usize>,
    /// Output format
    pub output_format: OutputFormat,
    /// Decimal places for fractional numbers in terminal output
    pub precision: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_file: PathBuf::new(),
            delimiter: None,
            infer_types: true,
            report: Report::default(),
            column: None,
            group_by: None,
            head: None,
            tail: None,
            output_format: OutputFormat::default(),
            precision: None,
        }
    }
}

impl Config {
    /// Create a new Config for an input file
    pub fn new(input_file: PathBuf) -> Self {
        Self {
            input_file,
            ..Default::default()
        }
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Enable or disable type inference after loading
    pub fn with_infer_types(mut self, infer: bool) -> Self {
        self.infer_types = infer;
        self
    }

    /// Set the report to produce
    pub fn with_report(mut self, report: Report) -> Self {
        self.report = report;
        self
    }

    /// Restrict the report to a single column
    pub fn with_column(mut self, column: String) -> Self {
        self.column = Some(column);
        self
    }

    /// Group rows by a key column
    pub fn with_group_by(mut self, column: String) -> Self {
        self.group_by = Some(column);
        self
    }

    /// Keep only the first rows
    pub fn with_head(mut self, n: usize) -> Self {
        self.head = Some(n);
        self
    }

    /// Keep only the last rows
    pub fn with_tail(mut self, n: usize) -> Self {
        self.tail = Some(n);
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Round fractional numbers in terminal output
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }
}
