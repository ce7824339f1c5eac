//! Image inputs
//!
//! This module defines what the pipeline reads from and how a scan run
//! finds its inputs.

mod image_source;
mod discovery;

pub use image_source::{ImageSource, FileImage, MemoryImage};
pub use discovery::ImageDiscovery;
