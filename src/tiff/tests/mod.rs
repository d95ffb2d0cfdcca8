//! Unit tests for the decoding pipeline

mod ifd_tests;
mod catalog_tests;
