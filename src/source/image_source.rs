//! Addressable image inputs
//!
//! An [`ImageSource`] is anything the pipeline can name, read bytes from and
//! optionally ask for a fallback timestamp. Files on disk and in-memory
//! blobs are the two implementations.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::debug;

use crate::errors::ScanResult;

/// An image input for the extraction pipeline
pub trait ImageSource: Send + Sync {
    /// Name reported in the output record
    fn name(&self) -> &str;

    /// Read the raw encoded bytes of the image
    fn read_bytes(&self) -> ScanResult<Vec<u8>>;

    /// Timestamp reported by the source itself (filesystem or blob attributes)
    ///
    /// Used when the image carries no usable embedded capture time.
    fn fallback_time(&self) -> Option<DateTime<Utc>>;
}

impl fmt::Debug for dyn ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageSource").field("name", &self.name()).finish()
    }
}

/// An image stored on the local filesystem
#[derive(Debug, Clone)]
pub struct FileImage {
    path: PathBuf,
    name: String,
}

impl FileImage {
    /// Create a file input; the record name is the file name without directories
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        FileImage { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for FileImage {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_bytes(&self) -> ScanResult<Vec<u8>> {
        Ok(fs::read(&self.path)?)
    }

    /// Last modification time, or the creation time where modification
    /// time is not reported by the platform
    fn fallback_time(&self) -> Option<DateTime<Utc>> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) => {
                debug!("No filesystem metadata for {}: {}", self.path.display(), e);
                return None;
            }
        };

        metadata
            .modified()
            .or_else(|_| metadata.created())
            .map(DateTime::<Utc>::from)
            .map_err(|e| debug!("No filesystem time for {}: {}", self.path.display(), e))
            .ok()
    }
}

/// An image held in memory, such as an uploaded blob
#[derive(Debug, Clone)]
pub struct MemoryImage {
    name: String,
    bytes: Vec<u8>,
    modified: Option<DateTime<Utc>>,
}

impl MemoryImage {
    pub fn new<S: Into<String>>(name: S, bytes: Vec<u8>) -> Self {
        MemoryImage {
            name: name.into(),
            bytes,
            modified: None,
        }
    }

    /// Attach the last-modified time reported alongside the blob
    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }
}

impl ImageSource for MemoryImage {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_bytes(&self) -> ScanResult<Vec<u8>> {
        Ok(self.bytes.clone())
    }

    fn fallback_time(&self) -> Option<DateTime<Utc>> {
        self.modified
    }
}
