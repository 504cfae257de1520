//! CLI command handlers

pub mod commands;

pub use commands::{attributes, fill, next, FillOverrides};
