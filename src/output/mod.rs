//! Display sinks for tables

mod delimited;
mod json;
mod terminal;

use std::io::{IsTerminal, Write};

use anyhow::Result;
use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::config::OutputFormat;
use crate::model::Table;

pub use delimited::CsvOutput;
pub use json::JsonOutput;
pub use terminal::TerminalOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a table to a writer
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat, precision: Option<usize>) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new().with_precision(precision)),
            OutputFormat::Json => Box::new(JsonOutput::new()),
            OutputFormat::Csv => Box::new(CsvOutput::new()),
        }
    }
}

/// Print a table, or a single column of it, to stdout
pub fn print(table: &Table, column: Option<&str>, format: OutputFormat) -> Result<()> {
    match column {
        Some(name) => render_to_stdout(&table.select(&[name])?, None, format, None),
        None => render_to_stdout(table, None, format, None),
    }
}

/// Render a table to stdout, with a bold title line in terminal format
pub fn render_to_stdout(
    table: &Table,
    title: Option<&str>,
    format: OutputFormat,
    precision: Option<usize>,
) -> Result<()> {
    let color_choice = if std::io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);

    if let (Some(title), OutputFormat::Terminal) = (title, format) {
        stdout.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(stdout, "{}", title)?;
        stdout.reset()?;
    }

    let formatter = OutputFactory::create(format, precision);
    formatter.render(table, &mut stdout)
}
