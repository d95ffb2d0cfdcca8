//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod options;
pub mod inspect_command;
pub mod export_command;

pub use command_traits::{Command, CommandFactory};
pub use export_command::{ExportCommand, ExportFormat};
pub use inspect_command::InspectCommand;
pub use options::{BatchResult, InspectOptions};

use clap::ArgMatches;
use crate::tiff::errors::TiffResult;

/// Factory for creating command instances based on CLI arguments
///
/// `--export` selects the export command; everything else prints reports.
pub struct DngmetaCommandFactory;

impl DngmetaCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        DngmetaCommandFactory
    }
}

impl Default for DngmetaCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for DngmetaCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> TiffResult<Box<dyn Command>> {
        if args.contains_id("export") {
            Ok(Box::new(ExportCommand::new(args)?))
        } else {
            Ok(Box::new(InspectCommand::new(args)?))
        }
    }
}
