//! Report output

mod csv_writer;

pub use csv_writer::{CsvReportWriter, CSV_HEADER};
