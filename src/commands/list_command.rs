//! Input listing command
//!
//! Prints the images a scan would process, in processing order, without
//! decoding anything.

use log::info;

use crate::commands::command_traits::Command;
use crate::config::ScanConfig;
use crate::errors::ScanResult;
use crate::source::ImageDiscovery;

/// Command for listing scan inputs
pub struct ListCommand {
    config: ScanConfig,
}

impl ListCommand {
    pub fn new(config: ScanConfig) -> ScanResult<Self> {
        Ok(ListCommand { config })
    }
}

impl Command for ListCommand {
    fn execute(&self) -> ScanResult<()> {
        let paths = ImageDiscovery::new(&self.config).discover_paths()?;

        for path in &paths {
            println!("{}", path.display());
        }

        info!("{} image(s) would be scanned", paths.len());
        Ok(())
    }
}
