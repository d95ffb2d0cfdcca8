//! I/O utilities for buffer access and file acquisition
//!
//! This module provides the byte order strategies, the bounds-checked
//! buffer reader the decoder runs on, and the loader that turns a file
//! on disk into a complete buffer.

pub mod byte_order;
pub mod byte_reader;
pub mod source;
