//! CSV report writer

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use log::info;

use crate::config::{OutputTarget, QuoteMode};
use crate::errors::{ScanError, ScanResult};
use crate::pipeline::Record;

/// Column titles of the report
pub const CSV_HEADER: [&str; 3] = ["Filename", "QR Code Content", "Date/Time"];

/// Serializes records as CSV
#[derive(Debug, Clone, Copy)]
pub struct CsvReportWriter {
    quote_mode: QuoteMode,
}

impl CsvReportWriter {
    pub fn new(quote_mode: QuoteMode) -> Self {
        CsvReportWriter { quote_mode }
    }

    /// Write the header and one row per record to any writer
    pub fn write_to<W: Write>(&self, writer: W, records: &[Record]) -> ScanResult<()> {
        let quote_style = match self.quote_mode {
            QuoteMode::Necessary => QuoteStyle::Necessary,
            QuoteMode::Always => QuoteStyle::Always,
        };

        let mut csv_writer = WriterBuilder::new()
            .quote_style(quote_style)
            .from_writer(writer);

        csv_writer.write_record(CSV_HEADER)?;
        for record in records {
            csv_writer.write_record(record.to_fields())?;
        }
        csv_writer.flush()?;

        Ok(())
    }

    /// Render the report into a string
    pub fn render(&self, records: &[Record]) -> ScanResult<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer, records)?;
        String::from_utf8(buffer)
            .map_err(|e| ScanError::GenericError(format!("CSV output is not UTF-8: {}", e)))
    }

    /// Write the report to a file, replacing it if it exists
    pub fn write_file<P: AsRef<Path>>(&self, path: P, records: &[Record]) -> ScanResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file), records)?;
        info!("CSV file created successfully: {}", path.display());
        Ok(())
    }

    /// Write the report to the configured target
    pub fn write_target(&self, target: &OutputTarget, records: &[Record]) -> ScanResult<()> {
        match target {
            OutputTarget::File(path) => self.write_file(path, records),
            OutputTarget::Stdout => {
                let stdout = io::stdout();
                self.write_to(stdout.lock(), records)
            }
        }
    }
}
