//! Input enumeration
//!
//! Turns a [`ScanConfig`] into the ordered list of image sources the
//! pipeline will process.

use std::fs;
use std::path::PathBuf;

use log::{debug, info};

use crate::config::ScanConfig;
use crate::errors::ScanResult;

use super::image_source::{FileImage, ImageSource};

/// Enumerates image inputs for a scan run
pub struct ImageDiscovery<'a> {
    config: &'a ScanConfig,
}

impl<'a> ImageDiscovery<'a> {
    pub fn new(config: &'a ScanConfig) -> Self {
        ImageDiscovery { config }
    }

    /// Paths to process, in processing order
    ///
    /// Explicit files are returned as given. Otherwise the input directory is
    /// listed (non-recursively), filtered by extension and sorted by name.
    ///
    /// # Errors
    /// Fails when the input directory cannot be read.
    pub fn discover_paths(&self) -> ScanResult<Vec<PathBuf>> {
        if !self.config.files.is_empty() {
            info!("Using {} selected file(s)", self.config.files.len());
            return Ok(self.config.files.clone());
        }

        let dir = &self.config.input_dir;
        info!("Scanning directory {}", dir.display());

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type()?.is_file() && !path.is_file() {
                continue;
            }

            if self.config.accepts_extension(&path) {
                paths.push(path);
            } else {
                debug!("Skipping {}", path.display());
            }
        }

        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        info!("Found {} image(s) in {}", paths.len(), dir.display());

        Ok(paths)
    }

    /// Discovered inputs wrapped as pipeline sources
    pub fn discover(&self) -> ScanResult<Vec<Box<dyn ImageSource>>> {
        Ok(self
            .discover_paths()?
            .into_iter()
            .map(|path| Box::new(FileImage::new(path)) as Box<dyn ImageSource>)
            .collect())
    }
}
