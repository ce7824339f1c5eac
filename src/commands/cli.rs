//! Command-line definition

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Build the clap command for the `qrstamp` binary
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("qrstamp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Decode QR codes from a folder of images and export them with timestamps as CSV")
        .arg(
            Arg::new("input")
                .help("Image files to scan (scans --dir when omitted)")
                .value_name("FILE")
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("dir")
                .short('d')
                .long("dir")
                .help("Directory of images to scan [default: ./images]")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output CSV file, or '-' for stdout [default: ./qr_codes.csv]")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of images processed concurrently [default: 1]")
                .value_name("N")
                .required(false),
        )
        .arg(
            Arg::new("ext")
                .long("ext")
                .help("Comma-separated extensions picked up from the directory [default: png,jpg,jpeg]")
                .value_name("LIST")
                .required(false),
        )
        .arg(
            Arg::new("quote-all")
                .long("quote-all")
                .help("Quote every CSV field")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-progress")
                .long("no-progress")
                .help("Do not draw a progress bar")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("List the images that would be scanned and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Log file [default: qrstamp.log]")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
}
