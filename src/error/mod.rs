//! Error handling module
//!
//! Schema, invocation and host errors, each knowing its exit code

pub mod types;

pub use types::*;
