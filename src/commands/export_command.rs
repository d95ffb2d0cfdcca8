//! Metadata export command
//!
//! Decodes every input and writes the results as one TOML or XML document,
//! either to a file or to stdout.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::options::{BatchResult, InspectOptions};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::utils::report_utils;
use crate::utils::xml_utils;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Toml,
    Xml,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> TiffResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "toml" => Ok(ExportFormat::Toml),
            "xml" => Ok(ExportFormat::Xml),
            other => Err(TiffError::GenericError(format!(
                "Unsupported export format: {} (expected toml or xml)",
                other
            ))),
        }
    }
}

/// Command for exporting metadata documents
pub struct ExportCommand {
    options: InspectOptions,
    format: ExportFormat,
    /// Destination file; stdout when absent
    output: Option<PathBuf>,
}

impl ExportCommand {
    /// Create a new export command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new ExportCommand instance or an error
    pub fn new(args: &ArgMatches) -> TiffResult<Self> {
        let format = args
            .get_one::<String>("export")
            .ok_or_else(|| TiffError::GenericError("Missing export format".to_string()))?;

        Ok(ExportCommand {
            options: InspectOptions::from_args(args)?,
            format: ExportFormat::from_name(format)?,
            output: args.get_one::<String>("output").map(PathBuf::from),
        })
    }

    fn render(&self, batch: &BatchResult) -> TiffResult<String> {
        let filter = self.options.filter.as_ref();
        match self.format {
            ExportFormat::Toml => report_utils::to_toml(&batch.inspections, filter),
            ExportFormat::Xml => xml_utils::to_xml(&batch.inspections, filter),
        }
    }
}

impl Command for ExportCommand {
    fn execute(&self) -> TiffResult<()> {
        let batch = self.options.inspect_all(|_, _, _| {})?;
        let document = self.render(&batch)?;

        match &self.output {
            Some(path) => {
                fs::write(path, &document)?;
                info!("Wrote {:?} export to {}", self.format, path.display());
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(document.as_bytes())?;
                stdout.flush()?;
            }
        }

        match batch.failure_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
