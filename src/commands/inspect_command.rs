//! DNG metadata inspection command
//!
//! This module implements the default command: decode each input and print
//! a text report of its tags.

use clap::ArgMatches;
use log::debug;

use crate::commands::command_traits::Command;
use crate::commands::options::InspectOptions;
use crate::tiff::errors::TiffResult;
use crate::utils::report_utils::format_report;

/// Command for printing text reports
pub struct InspectCommand {
    options: InspectOptions,
}

impl InspectCommand {
    /// Create a new inspect command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A new InspectCommand instance or an error
    pub fn new(args: &ArgMatches) -> TiffResult<Self> {
        Ok(InspectCommand {
            options: InspectOptions::from_args(args)?,
        })
    }
}

impl Command for InspectCommand {
    fn execute(&self) -> TiffResult<()> {
        debug!("Inspecting {} files", self.options.inputs.len());

        let filter = self.options.filter.as_ref();
        let warnings = self.options.warnings;

        let batch = self.options.inspect_all(|progress, path, result| match result {
            Ok(inspection) => progress.println(&format_report(inspection, filter, warnings)),
            Err(e) => progress.println(&format!("File: {}\n  Error: {}\n", path.display(), e)),
        })?;

        match batch.failure_error() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
