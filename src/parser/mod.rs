//! Argument parsing module
//!
//! Turns a raw argument vector into an ordered option map

pub mod argv;

pub use argv::*;
