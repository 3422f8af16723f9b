//! tabstat - Summary statistics for CSV/TSV files

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::debug;

use tabstat::config::{Config, OutputFormat, Report};
use tabstat::model::{CellValue, Column, Table};
use tabstat::output::{print, render_to_stdout};
use tabstat::parser::ParserFactory;
use tabstat::stats::{aggregate, describe, group_by, summarize, Aggregation};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
    Csv,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Csv => OutputFormat::Csv,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliStat {
    Count,
    Mean,
    Median,
    Min,
    Max,
    #[value(alias = "sd")]
    Std,
    Describe,
}

impl From<CliStat> for Report {
    fn from(s: CliStat) -> Self {
        match s {
            CliStat::Count => Report::Aggregate(Aggregation::Count),
            CliStat::Mean => Report::Aggregate(Aggregation::Mean),
            CliStat::Median => Report::Aggregate(Aggregation::Median),
            CliStat::Min => Report::Aggregate(Aggregation::Min),
            CliStat::Max => Report::Aggregate(Aggregation::Max),
            CliStat::Std => Report::Aggregate(Aggregation::StdDev),
            CliStat::Describe => Report::Describe,
        }
    }
}

/// Spreadsheet-style summary statistics for CSV/TSV files
#[derive(Parser, Debug)]
#[command(name = "tabstat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV or TSV file with a header row
    file: PathBuf,

    /// Statistic to compute
    #[arg(short, long, value_enum, default_value = "describe")]
    stat: CliStat,

    /// Only report on this column
    #[arg(short, long)]
    column: Option<String>,

    /// Aggregate per distinct value of this column
    #[arg(short, long, conflicts_with = "types")]
    group_by: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// Keep every column as text instead of inferring numbers
    #[arg(long)]
    no_infer: bool,

    /// Only use the first N rows
    #[arg(long, conflicts_with = "tail")]
    head: Option<usize>,

    /// Only use the last N rows
    #[arg(long)]
    tail: Option<usize>,

    /// Print the table instead of computing statistics
    #[arg(long, conflicts_with_all = ["types", "group_by"])]
    print: bool,

    /// List the inferred type of each column
    #[arg(long)]
    types: bool,

    /// Decimal places for fractional numbers in terminal output
    #[arg(long)]
    precision: Option<usize>,

    /// Field delimiter (defaults to tab for .tsv, comma otherwise)
    #[arg(short, long)]
    delimiter: Option<char>,
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let report = if cli.print {
        Report::Print
    } else if cli.types {
        Report::Types
    } else {
        cli.stat.into()
    };

    let mut config = Config::new(cli.file)
        .with_report(report)
        .with_output_format(cli.format.into())
        .with_infer_types(!cli.no_infer);
    if let Some(column) = cli.column {
        config = config.with_column(column);
    }
    if let Some(key) = cli.group_by {
        config = config.with_group_by(key);
    }
    if let Some(n) = cli.head {
        config = config.with_head(n);
    }
    if let Some(n) = cli.tail {
        config = config.with_tail(n);
    }
    if let Some(p) = cli.precision {
        config = config.with_precision(p);
    }
    if let Some(d) = cli.delimiter {
        let byte = u8::try_from(d).ok().filter(u8::is_ascii).with_context(|| {
            format!("Delimiter must be a single ASCII character, got {:?}", d)
        })?;
        config = config.with_delimiter(byte);
    }
    debug!("{:?}", config);

    if config.group_by.is_some() && !matches!(config.report, Report::Aggregate(_)) {
        anyhow::bail!("--group-by requires --stat count|mean|median|min|max|std");
    }

    let table = ParserFactory::new()
        .parse(&config.input_file, &config)
        .with_context(|| format!("Failed to parse file: {}", config.input_file.display()))?;

    let table = match (config.head, config.tail) {
        (Some(n), _) => table.head(n),
        (None, Some(n)) => table.tail(n),
        (None, None) => table,
    };

    let (title, output) = match config.report {
        Report::Print => return print(&table, config.column.as_deref(), config.output_format),
        Report::Types => types_report(&table)?,
        Report::Describe => describe_report(&table, config.column.as_deref())?,
        Report::Aggregate(kind) => aggregate_report(&table, kind, &config)?,
    };
    render_to_stdout(&output, Some(&title), config.output_format, config.precision)
}

/// Inferred type of each column
fn types_report(table: &Table) -> Result<(String, Table)> {
    let (names, types): (Vec<&str>, Vec<String>) = table
        .dtypes()
        .into_iter()
        .map(|(name, ty)| (name, ty.to_string()))
        .unzip();
    let output = Table::from_columns(vec![
        Column::with_values("column", names),
        Column::with_values("type", types),
    ])?;
    Ok(("Column types".to_string(), output))
}

fn describe_report(table: &Table, column: Option<&str>) -> Result<(String, Table)> {
    let output = match column {
        Some(name) => describe(&table.select(&[name])?),
        None => describe(table),
    };
    Ok(("Summary by column".to_string(), output))
}

/// One statistic, optionally for a single column and per group
fn aggregate_report(table: &Table, kind: Aggregation, config: &Config) -> Result<(String, Table)> {
    let column = config.column.as_deref();

    match (&config.group_by, column) {
        (Some(key), Some(name)) => {
            let output = group_by(table, key)?.aggregate_column(kind, name)?;
            Ok((format!("{} of {} by {}", kind, name, key), output))
        }
        (Some(key), None) => {
            let output = group_by(table, key)?.aggregate(kind)?;
            Ok((format!("{} by {}", kind, key), output))
        }
        (None, Some(name)) => {
            let value = aggregate(table, kind, name)?;
            let output =
                Table::from_columns(vec![Column::with_values(name, [CellValue::from(value)])])?;
            Ok((format!("{} of {}", kind, name), output))
        }
        (None, None) => Ok((format!("{} by column", kind), summarize(table, kind)?)),
    }
}
