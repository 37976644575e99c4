pub mod cli;
pub mod config;
pub mod models;

pub mod chart;
pub mod dataset;
pub mod filter;
pub mod lfs;
pub mod transfer;

mod report;

pub use report::RunOutcome;

use crate::cli::Cli;
use anyhow::Context;
use chrono::Local;
use log::{error, info};

/// Runs one report cycle. Logs the START/END markers and, on failure, the
/// error with its cause chain; the caller decides the process exit code
/// from the returned result.
pub fn run(cli: &Cli) -> anyhow::Result<RunOutcome> {
    info!("START");

    let start_date = Local::now();

    match report::execute(cli, start_date) {
        Ok(outcome) => {
            match &outcome {
                RunOutcome::Weekly {
                    reports,
                    transferred,
                } => {
                    info!(
                        "Created {} weekly report files{}",
                        reports.len(),
                        if *transferred { " (transferred)" } else { "" }
                    );
                }
                RunOutcome::MonthlyNotSupported => {
                    info!("Monthly run mode is not supported yet, nothing to do");
                }
            }

            info!("END");
            Ok(outcome)
        }
        Err(e) => {
            error!("Caught error: {e:#}");
            // Print chain of error causes
            let mut source = e.source();
            while let Some(cause) = source {
                error!("Caused by: {cause}");
                source = cause.source();
            }
            Err(e).context("Report run failed")
        }
    }
}
