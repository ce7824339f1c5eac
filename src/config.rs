//! Scan configuration
//!
//! A [`ScanConfig`] is built once per run from defaults, an optional TOML
//! file and command-line overrides (in that order of precedence), and then
//! passed explicitly to everything that needs it.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::debug;

use crate::errors::{ScanError, ScanResult};

/// Directory scanned when no explicit files are given
pub const DEFAULT_INPUT_DIR: &str = "./images";
/// CSV written when no output is given
pub const DEFAULT_OUTPUT_FILE: &str = "./qr_codes.csv";
/// Log file written alongside every run
pub const DEFAULT_LOG_FILE: &str = "qrstamp.log";
/// Extensions picked up by directory enumeration
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Upper bound on concurrent extractions
pub const MAX_JOBS: usize = 256;

/// Where the CSV report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to a file on disk
    File(PathBuf),
    /// Stream to standard output
    Stdout,
}

impl OutputTarget {
    /// Parse an output argument, where `-` means standard output
    pub fn parse(value: &str) -> Self {
        if value == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(value))
        }
    }
}

/// CSV quoting policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteMode {
    /// Quote only fields that contain delimiters, quotes or line breaks
    Necessary,
    /// Quote every field
    Always,
}

impl QuoteMode {
    pub fn from_name(name: &str) -> ScanResult<Self> {
        match name.to_lowercase().as_str() {
            "necessary" | "minimal" => Ok(QuoteMode::Necessary),
            "always" | "all" => Ok(QuoteMode::Always),
            _ => Err(ScanError::ConfigError(format!("Unknown quote mode: {}", name))),
        }
    }
}

/// Configuration for a single scan run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory enumerated when `files` is empty
    pub input_dir: PathBuf,
    /// Explicitly selected files, processed in the given order
    pub files: Vec<PathBuf>,
    /// Destination of the CSV report
    pub output: OutputTarget,
    /// Lowercase extensions (without dot) accepted from the directory
    pub extensions: Vec<String>,
    /// CSV quoting policy
    pub quote_mode: QuoteMode,
    /// Number of images processed concurrently
    pub jobs: usize,
    /// Whether to draw a progress bar
    pub show_progress: bool,
    /// Log file path
    pub log_file: PathBuf,
    /// Debug-level logging
    pub verbose: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            files: Vec::new(),
            output: OutputTarget::File(PathBuf::from(DEFAULT_OUTPUT_FILE)),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            quote_mode: QuoteMode::Necessary,
            jobs: 1,
            show_progress: true,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            verbose: false,
        }
    }
}

impl ScanConfig {
    /// Parse a configuration from a TOML string, starting from the defaults
    ///
    /// Recognised keys:
    ///
    /// ```toml
    /// [scan]
    /// input_dir = "./images"
    /// extensions = ["png", "jpg", "jpeg"]
    /// jobs = 4
    ///
    /// [output]
    /// path = "./qr_codes.csv"   # "-" for stdout
    /// quote = "necessary"       # or "always"
    /// progress = true
    ///
    /// [log]
    /// file = "qrstamp.log"
    /// verbose = false
    /// ```
    pub fn from_toml_str(content: &str) -> ScanResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(ScanError::ConfigError(format!("Failed to parse TOML: {}", e))),
        };

        let mut config = ScanConfig::default();

        if let Some(scan) = toml_value.get("scan").and_then(|v| v.as_table()) {
            if let Some(dir) = scan.get("input_dir").and_then(|v| v.as_str()) {
                config.input_dir = PathBuf::from(dir);
            }
            if let Some(list) = scan.get("extensions").and_then(|v| v.as_array()) {
                let mut extensions = Vec::new();
                for item in list {
                    let ext = item.as_str().ok_or_else(|| {
                        ScanError::ConfigError("scan.extensions must be a list of strings".to_string())
                    })?;
                    extensions.push(normalize_extension(ext));
                }
                config.extensions = extensions;
            }
            if let Some(jobs) = scan.get("jobs") {
                let jobs = jobs.as_integer().ok_or_else(|| {
                    ScanError::ConfigError("scan.jobs must be an integer".to_string())
                })?;
                config.jobs = validate_jobs(jobs)?;
            }
        }

        if let Some(output) = toml_value.get("output").and_then(|v| v.as_table()) {
            if let Some(path) = output.get("path").and_then(|v| v.as_str()) {
                config.output = OutputTarget::parse(path);
            }
            if let Some(quote) = output.get("quote").and_then(|v| v.as_str()) {
                config.quote_mode = QuoteMode::from_name(quote)?;
            }
            if let Some(progress) = output.get("progress").and_then(|v| v.as_bool()) {
                config.show_progress = progress;
            }
        }

        if let Some(log) = toml_value.get("log").and_then(|v| v.as_table()) {
            if let Some(file) = log.get("file").and_then(|v| v.as_str()) {
                config.log_file = PathBuf::from(file);
            }
            if let Some(verbose) = log.get("verbose").and_then(|v| v.as_bool()) {
                config.verbose = verbose;
            }
        }

        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ScanResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ScanError::ConfigError(format!("Cannot read config file {}: {}", path.display(), e))
        })?;

        debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Build the configuration for a CLI run
    ///
    /// Loads `--config` when given, then applies every explicit flag on top.
    pub fn from_args(args: &ArgMatches) -> ScanResult<Self> {
        let mut config = match args.get_one::<String>("config") {
            Some(path) => Self::from_file(path)?,
            None => ScanConfig::default(),
        };
        config.apply_args(args)?;
        Ok(config)
    }

    /// Apply command-line overrides
    pub fn apply_args(&mut self, args: &ArgMatches) -> ScanResult<()> {
        if let Some(files) = args.get_many::<String>("input") {
            self.files = files.map(PathBuf::from).collect();
        }

        if let Some(dir) = args.get_one::<String>("dir") {
            self.input_dir = PathBuf::from(dir);
        }

        if let Some(output) = args.get_one::<String>("output") {
            self.output = OutputTarget::parse(output);
        }

        if let Some(ext) = args.get_one::<String>("ext") {
            let extensions: Vec<String> = ext
                .split(',')
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(normalize_extension)
                .collect();
            if extensions.is_empty() {
                return Err(ScanError::ConfigError(format!("Invalid extension list: '{}'", ext)));
            }
            self.extensions = extensions;
        }

        if let Some(jobs) = args.get_one::<String>("jobs") {
            let parsed = jobs.parse::<i64>()
                .map_err(|_| ScanError::ConfigError(format!("Invalid job count: {}", jobs)))?;
            self.jobs = validate_jobs(parsed)?;
        }

        if args.get_flag("quote-all") {
            self.quote_mode = QuoteMode::Always;
        }

        if args.get_flag("no-progress") {
            self.show_progress = false;
        }

        if let Some(log_file) = args.get_one::<String>("log-file") {
            self.log_file = PathBuf::from(log_file);
        }

        if args.get_flag("verbose") {
            self.verbose = true;
        }

        Ok(())
    }

    /// Whether a file name carries one of the configured extensions
    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(std::ffi::OsStr::to_str)
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext)
            })
            .unwrap_or(false)
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

fn validate_jobs(jobs: i64) -> ScanResult<usize> {
    if jobs < 1 {
        return Err(ScanError::ConfigError(format!("Job count must be at least 1, got {}", jobs)));
    }
    if jobs > MAX_JOBS as i64 {
        return Err(ScanError::ConfigError(format!("Job count must be at most {}, got {}", MAX_JOBS, jobs)));
    }
    Ok(jobs as usize)
}
