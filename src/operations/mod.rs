//! Operations module
//!
//! Coordinates manifest lookup and command dispatch for the host binary

pub mod run;

pub use run::*;
