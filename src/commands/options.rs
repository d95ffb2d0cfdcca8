//! Options shared by every command
//!
//! Both commands read the same inputs and decode them the same way; they
//! only differ in how results are rendered.

use std::path::PathBuf;

use clap::ArgMatches;
use log::{error, info};

use crate::api::{DngInspector, Inspection};
use crate::tiff::errors::{TiffError, TiffResult};
use crate::utils::progress::ProgressTracker;
use crate::utils::report_utils::TagFilter;

/// Decoding options parsed from the command line
pub struct InspectOptions {
    /// Files to inspect, in command-line order
    pub inputs: Vec<PathBuf>,
    pub filter: Option<TagFilter>,
    /// Catalog overlaid on the built-in one
    pub catalog: Option<PathBuf>,
    /// Skip the media type check
    pub force: bool,
    /// Include diagnostics in text reports
    pub warnings: bool,
}

/// Outcome of inspecting every input
pub struct BatchResult {
    pub inspections: Vec<Inspection>,
    /// Inputs that failed, with their error
    pub failures: Vec<(PathBuf, TiffError)>,
}

impl BatchResult {
    /// Error summarizing the failures, if there were any
    pub fn failure_error(&self) -> Option<TiffError> {
        if self.failures.is_empty() {
            return None;
        }
        Some(TiffError::GenericError(format!(
            "{} of {} files failed",
            self.failures.len(),
            self.failures.len() + self.inspections.len()
        )))
    }
}

impl InspectOptions {
    pub fn from_args(args: &ArgMatches) -> TiffResult<Self> {
        let inputs: Vec<PathBuf> = args
            .get_many::<String>("input")
            .ok_or_else(|| TiffError::GenericError("Missing input file".to_string()))?
            .map(PathBuf::from)
            .collect();

        let filter = match args.get_one::<String>("filter") {
            Some(pattern) => Some(TagFilter::new(pattern)?),
            None => None,
        };

        Ok(InspectOptions {
            inputs,
            filter,
            catalog: args.get_one::<String>("catalog").map(PathBuf::from),
            force: args.get_flag("force"),
            warnings: args.get_flag("warnings"),
        })
    }

    /// Builds the inspector these options describe
    pub fn inspector(&self) -> TiffResult<DngInspector> {
        let inspector = DngInspector::new().force(self.force);
        match &self.catalog {
            Some(path) => inspector.with_catalog_overlay(path),
            None => Ok(inspector),
        }
    }

    /// Inspects every input, continuing past failures
    ///
    /// `on_result` sees each outcome as it happens, along with the progress
    /// tracker so it can print without tearing the bar.
    pub fn inspect_all<F>(&self, mut on_result: F) -> TiffResult<BatchResult>
    where
        F: FnMut(&ProgressTracker, &PathBuf, Result<&Inspection, &TiffError>),
    {
        let inspector = self.inspector()?;

        let progress = if self.inputs.len() > 1 {
            ProgressTracker::new(self.inputs.len() as u64, "Inspecting files")
        } else {
            ProgressTracker::hidden()
        };

        let mut result = BatchResult {
            inspections: Vec::with_capacity(self.inputs.len()),
            failures: Vec::new(),
        };

        for path in &self.inputs {
            progress.set_message(&path.display().to_string());
            match inspector.inspect_file(path) {
                Ok(inspection) => {
                    on_result(&progress, path, Ok(&inspection));
                    result.inspections.push(inspection);
                }
                Err(e) => {
                    error!("{}: {}", path.display(), e);
                    on_result(&progress, path, Err(&e));
                    result.failures.push((path.clone(), e));
                }
            }
            progress.increment(1);
        }

        progress.finish();
        info!(
            "Inspected {} files, {} failed",
            self.inputs.len(),
            result.failures.len()
        );

        Ok(result)
    }
}
