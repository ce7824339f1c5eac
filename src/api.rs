use std::path::PathBuf;

use log::info;

use crate::config::ScanConfig;
use crate::errors::ScanResult;
use crate::output::CsvReportWriter;
use crate::pipeline::{ExtractionPipeline, PipelineExecutor, Record};
use crate::source::{FileImage, ImageDiscovery, ImageSource, MemoryImage};

/// Main interface to the qrstamp library
pub struct Qrstamp {
    config: ScanConfig,
    writer: CsvReportWriter,
}

impl Qrstamp {
    /// Create a scanner for the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let writer = CsvReportWriter::new(config.quote_mode);
        Qrstamp { config, writer }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Enumerate the inputs described by the configuration
    ///
    /// # Returns
    /// Sources in processing order, or an error if the directory cannot be read
    pub fn discover(&self) -> ScanResult<Vec<Box<dyn ImageSource>>> {
        ImageDiscovery::new(&self.config).discover()
    }

    /// Run the extraction pipeline over `sources`
    ///
    /// Uses the concurrent executor when more than one job is configured.
    /// `on_record` is called once per input, in input order. The concurrent
    /// path builds its own tokio runtime, so call
    /// [`PipelineExecutor::execute`] directly from async code instead.
    ///
    /// # Returns
    /// One record per source, in the same order
    pub fn scan_sources<F>(&self, sources: Vec<Box<dyn ImageSource>>, mut on_record: F) -> ScanResult<Vec<Record>>
    where
        F: FnMut(&Record),
    {
        let pipeline = ExtractionPipeline::default();

        if self.config.jobs <= 1 || sources.len() <= 1 {
            return Ok(pipeline.run_with(&sources, &mut on_record));
        }

        PipelineExecutor::new(pipeline, self.config.jobs).run_blocking(sources, on_record)
    }

    /// Scan the inputs described by the configuration
    pub fn scan(&self) -> ScanResult<Vec<Record>> {
        let sources = self.discover()?;
        self.scan_sources(sources, |_| {})
    }

    /// Scan an explicit list of files, in the given order
    pub fn scan_files<I, P>(&self, paths: I) -> ScanResult<Vec<Record>>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let sources: Vec<Box<dyn ImageSource>> = paths
            .into_iter()
            .map(|path| Box::new(FileImage::new(path)) as Box<dyn ImageSource>)
            .collect();
        self.scan_sources(sources, |_| {})
    }

    /// Scan images held in memory, such as uploaded blobs
    pub fn scan_blobs(&self, blobs: Vec<MemoryImage>) -> ScanResult<Vec<Record>> {
        let sources: Vec<Box<dyn ImageSource>> = blobs
            .into_iter()
            .map(|blob| Box::new(blob) as Box<dyn ImageSource>)
            .collect();
        self.scan_sources(sources, |_| {})
    }

    /// Render records as CSV text
    pub fn render_csv(&self, records: &[Record]) -> ScanResult<String> {
        self.writer.render(records)
    }

    /// Write records to the configured output target
    pub fn write_report(&self, records: &[Record]) -> ScanResult<()> {
        info!("Writing {} record(s)", records.len());
        self.writer.write_target(&self.config.output, records)
    }
}
