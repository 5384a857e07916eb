//! Logging setup for the medishop tools.
//!
//! This crate provides:
//! - `LogLevel` / `LogFormat` - parsed from config or flags
//! - `init` - installs the global `tracing` subscriber

mod logging;

pub use logging::*;
