//! Command line interface for aunet
//!
//! This module contains argument definitions, command handlers, and
//! output utilities for the binary.

mod args;
mod commands;
mod logging;

pub use args::{parse_args, Cli, Command, InfoArgs, InspectArgs, OutputFormat, ValidateArgs};
pub use commands::run_command;
pub use logging::LogLevel;
