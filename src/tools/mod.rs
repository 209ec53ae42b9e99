//! The tools module provides the helpers around the codec proper.
//!
//! The tools are:
//! - cli: Command line interface for huffpress.
//! - file_ops: Opening inputs and outputs for the command line, one call per file.
//! - freq_count: Frequency count of the bytes in a stream.
//!
pub mod cli;
pub mod file_ops;
pub mod freq_count;
