//! Command-line interface module
//!
//! Handles host argument parsing; everything after the command name is left
//! to the declared command's own parser

pub mod args;

pub use args::*;
