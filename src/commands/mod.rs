//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod cli;
pub mod command_traits;
pub mod scan_command;
pub mod list_command;

pub use cli::build_cli;
pub use command_traits::{Command, CommandFactory};
pub use scan_command::ScanCommand;
pub use list_command::ListCommand;

use clap::ArgMatches;
use crate::config::ScanConfig;
use crate::errors::ScanResult;

/// Factory for creating command instances based on CLI arguments
pub struct QrstampCommandFactory;

impl QrstampCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        QrstampCommandFactory
    }
}

impl Default for QrstampCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for QrstampCommandFactory {
    fn create_command(&self, args: &ArgMatches, config: ScanConfig) -> ScanResult<Box<dyn Command>> {
        if args.get_flag("list") {
            Ok(Box::new(ListCommand::new(config)?))
        } else {
            // Default to scan command
            Ok(Box::new(ScanCommand::new(config)?))
        }
    }
}
