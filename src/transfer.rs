use crate::config::TransferConfig;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use log::{debug, info};
use std::path::PathBuf;
use std::process::Command;

/// Copies the finished report files to the configured rsync destination,
/// under a `<run_mode>/<date>` subdirectory derived from the run start.
///
/// Requires rsync >= 3.2.3 on both ends for `--mkpath`.
pub fn transfer_report(
    run_mode: &str,
    start_date: DateTime<Local>,
    reports: &[PathBuf],
    transfer: &TransferConfig,
) -> Result<()> {
    let remote_dir = remote_directory(&transfer.target, run_mode, start_date);

    info!(
        "Transferring {} report files to {}",
        reports.len(),
        remote_dir
    );

    let mut cmd = Command::new("rsync");
    cmd.args(["-az", "--mkpath"]);
    for report in reports {
        cmd.arg(report);
    }
    cmd.arg(format!("{remote_dir}/"));

    let output = cmd.output().context("Failed to run rsync")?;

    if !output.status.success() {
        bail!(
            "rsync exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    for report in reports {
        debug!("Transferred {}", report.display());
    }

    Ok(())
}

fn remote_directory(target: &str, run_mode: &str, start_date: DateTime<Local>) -> String {
    format!(
        "{}/{}/{}",
        target.trim_end_matches('/'),
        run_mode,
        start_date.format("%Y-%m-%d")
    )
}
