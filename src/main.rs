use std::process;
use log::error;

use qrstamp::commands::{build_cli, CommandFactory, QrstampCommandFactory};
use qrstamp::config::ScanConfig;
use qrstamp::utils::logger::Logger;

fn main() {
    let matches = build_cli().get_matches();

    let config = match ScanConfig::from_args(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger(&config.log_file, config.verbose) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = QrstampCommandFactory::new();

    let command_result = factory.create_command(&matches, config);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            process::exit(1);
        }
    };
}
