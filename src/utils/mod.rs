//! Utility modules for common functionality
//!
//! This module provides logging, progress display, report rendering and
//! string helpers used throughout the application.

pub mod logger;
pub mod progress;
pub mod report_utils;
pub mod xml_utils;
pub(crate) mod string_utils;
