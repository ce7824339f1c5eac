//! QR scan command
//!
//! Enumerates the inputs, runs the extraction pipeline over them and
//! writes the CSV report.

use log::info;

use crate::api::Qrstamp;
use crate::commands::command_traits::Command;
use crate::config::{OutputTarget, ScanConfig};
use crate::errors::ScanResult;
use crate::pipeline::ScanSummary;
use crate::utils::ProgressTracker;

/// Command for scanning images and writing the report
pub struct ScanCommand {
    scanner: Qrstamp,
}

impl ScanCommand {
    pub fn new(config: ScanConfig) -> ScanResult<Self> {
        Ok(ScanCommand {
            scanner: Qrstamp::new(config),
        })
    }

    fn progress_for(&self, total: usize) -> ProgressTracker {
        let config = self.scanner.config();
        if config.show_progress && config.output != OutputTarget::Stdout {
            ProgressTracker::new(total as u64, "Scanning images")
        } else {
            ProgressTracker::hidden()
        }
    }
}

impl Command for ScanCommand {
    fn execute(&self) -> ScanResult<()> {
        let sources = self.scanner.discover()?;
        let progress = self.progress_for(sources.len());

        let records = self.scanner.scan_sources(sources, |record| {
            progress.set_message(record.source_name());
            progress.increment(1);
        })?;
        progress.finish();

        self.scanner.write_report(&records)?;

        info!("{}", ScanSummary::from_records(&records));
        Ok(())
    }
}
