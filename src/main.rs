use clap::Parser;
use env_logger::{Builder, WriteStyle};
use log::LevelFilter;
use std::process::ExitCode;
use storage_report::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Checked before the logger exists, so nothing (START included) is
    // logged for a bad config path.
    if !cli.config_file.is_file() {
        eprintln!(
            "The config file does not exist or is not a file: {}",
            cli.config_file.display()
        );
        return ExitCode::FAILURE;
    }

    let level = if cli.enable_debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::new()
        .filter_level(level)
        .write_style(WriteStyle::Always)
        .format_timestamp_secs()
        .init();

    // Errors are already logged by the run itself.
    match storage_report::run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
