//! Grain dataset tooling
//!
//! This library provides the core functionality for the `graindata` and `grain-split` CLIs.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;
