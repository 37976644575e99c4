use crate::chart::{QuotaPctBarChart, UsagePieChart, UsageQuotaBarChart};
use crate::cli::Cli;
use crate::config::AppConfig;
use crate::{dataset, filter, lfs, transfer};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// What a report run produced, for the caller to inspect and log.
#[derive(Debug)]
pub enum RunOutcome {
    Weekly {
        /// Chart paths in creation order, also the transfer manifest.
        reports: Vec<PathBuf>,
        transferred: bool,
    },
    /// Monthly reports are not implemented yet; the run is a defined no-op.
    MonthlyNotSupported,
}

/// One report cycle: load the configuration, dispatch on the run mode,
/// build the charts and optionally hand them to the transfer step.
pub(crate) fn execute(cli: &Cli, start_date: DateTime<Local>) -> Result<RunOutcome> {
    let config = AppConfig::from_file(&cli.config_file)?;

    let run_mode = config.execution.mode.as_str();
    let transfer_enabled = config.execution.transfer == "on";

    match run_mode {
        "weekly" => {
            let chart_dir = PathBuf::from(&config.base_chart.report_dir);
            let reports = create_weekly_reports(
                cli.enable_local_mode,
                &chart_dir,
                &config.storage.long_name,
                &config,
            )?;

            let transferred = if transfer_enabled {
                let transfer_config = config
                    .transfer
                    .as_ref()
                    .context("Transfer is enabled but the [transfer] section is missing")?;
                transfer::transfer_report(run_mode, start_date, &reports, transfer_config)?;
                true
            } else {
                false
            };

            Ok(RunOutcome::Weekly {
                reports,
                transferred,
            })
        }
        "monthly" => Ok(RunOutcome::MonthlyNotSupported),
        other => bail!("Undefined run mode detected: {other}"),
    }
}

/// Builds the three weekly charts and returns their paths in creation
/// order: quota-pct bar, usage-quota bar, usage pie.
pub(crate) fn create_weekly_reports(
    local_mode: bool,
    chart_dir: &Path,
    long_name: &str,
    config: &AppConfig,
) -> Result<Vec<PathBuf>> {
    let mut reports = Vec::with_capacity(3);

    let (group_info_list, storage_total_size) = if local_mode {
        debug!("Weekly run mode: LOCAL/DEV");

        let total_size = config
            .storage
            .local_total_size
            .unwrap_or(dataset::LOCAL_MODE_TOTAL_SIZE);

        (dataset::create_dummy_group_info_list(), total_size)
    } else {
        debug!("Weekly run mode: PRODUCTIVE");

        let names = filter::filter_system_groups(dataset::get_group_names(&config.storage)?);
        let group_info_list =
            filter::filter_group_info_items(dataset::get_group_info_list(&names, &config.storage)?);
        let total_size = lfs::lustre_total_size(&config.storage.filesystem)?;

        (group_info_list, total_size)
    };

    let title = format!("Group Quota Usage on {long_name}");
    let chart_path = chart_dir.join(&config.quota_pct_bar_chart.filename);
    QuotaPctBarChart::new(&title, &group_info_list, &chart_path).create()?;
    info!("Created chart: {}", chart_path.display());
    reports.push(chart_path);

    let title = format!("Quota and Disk Space Usage on {long_name}");
    let chart_path = chart_dir.join(&config.usage_quota_bar_chart.filename);
    UsageQuotaBarChart::new(&title, &group_info_list, &chart_path).create()?;
    info!("Created chart: {}", chart_path.display());
    reports.push(chart_path);

    let title = format!("Storage Usage on {long_name}");
    let chart_path = chart_dir.join(&config.usage_pie_chart.filename);
    UsagePieChart::new(
        &title,
        &group_info_list,
        &chart_path,
        storage_total_size,
        config.usage_pie_chart.num_top_groups,
    )
    .create()?;
    info!("Created chart: {}", chart_path.display());
    reports.push(chart_path);

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &Path, mode: &str, report_dir: &Path) -> PathBuf {
        let content = format!(
            "[execution]\nmode = {mode}\ntransfer = off\n\n\
             [base_chart]\nreport_dir = {}\n\n\
             [storage]\nlong_name = Test FS\nfilesystem = /lustre/test\n\n\
             [quota_pct_bar_chart]\nfilename = q.png\n\n\
             [usage_quota_bar_chart]\nfilename = u.png\n\n\
             [usage_pie_chart]\nfilename = p.png\nnum_top_groups = 5\n",
            report_dir.display()
        );

        let path = dir.join("report.ini");
        fs::write(&path, content).unwrap();
        path
    }

    fn cli_for(config_file: PathBuf) -> Cli {
        Cli {
            config_file,
            enable_debug: false,
            enable_local_mode: true,
        }
    }

    #[test]
    fn test_monthly_run_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = write_config(dir.path(), "monthly", dir.path());

        let outcome = execute(&cli_for(config_file), Local::now()).unwrap();

        assert!(matches!(outcome, RunOutcome::MonthlyNotSupported));
        assert!(!dir.path().join("q.png").exists());
        assert!(!dir.path().join("u.png").exists());
        assert!(!dir.path().join("p.png").exists());
    }

    #[test]
    fn test_unknown_run_mode_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = write_config(dir.path(), "daily", dir.path());

        let err = execute(&cli_for(config_file), Local::now()).unwrap_err();

        assert!(err.to_string().contains("daily"));
        assert!(!dir.path().join("q.png").exists());
    }

    #[test]
    fn test_missing_config_key_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = write_config(dir.path(), "weekly", dir.path());

        let content = fs::read_to_string(&config_file).unwrap();
        fs::write(&config_file, content.replace("long_name = Test FS\n", "")).unwrap();

        assert!(execute(&cli_for(config_file), Local::now()).is_err());
    }

    #[test]
    #[ignore = "font rendering not available in headless test environments"]
    fn test_weekly_local_run_creates_three_charts_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = write_config(dir.path(), "weekly", dir.path());

        let outcome = execute(&cli_for(config_file), Local::now()).unwrap();

        match outcome {
            RunOutcome::Weekly {
                reports,
                transferred,
            } => {
                assert!(!transferred);
                assert_eq!(
                    reports,
                    vec![
                        dir.path().join("q.png"),
                        dir.path().join("u.png"),
                        dir.path().join("p.png"),
                    ]
                );
                for report in &reports {
                    assert!(report.exists());
                }
            }
            other => panic!("expected a weekly outcome, got {other:?}"),
        }
    }

    #[test]
    #[ignore = "font rendering not available in headless test environments"]
    fn test_weekly_local_run_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = write_config(dir.path(), "weekly", dir.path());
        let cli = cli_for(config_file);

        let first = execute(&cli, Local::now()).unwrap();
        let second = execute(&cli, Local::now()).unwrap();

        let paths = |outcome: RunOutcome| match outcome {
            RunOutcome::Weekly { reports, .. } => reports,
            other => panic!("expected a weekly outcome, got {other:?}"),
        };

        assert_eq!(paths(first), paths(second));
    }
}
