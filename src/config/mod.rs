use anyhow::{Context, Result};
use config::{Config, File, FileFormat};
use log::debug;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ExecutionConfig {
    /// Report cadence, `weekly` or `monthly`.
    pub mode: String,
    /// `on` enables the transfer step, any other value disables it.
    pub transfer: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BaseChartConfig {
    pub report_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Display name of the storage system, used in chart titles.
    pub long_name: String,
    /// Lustre filesystem identifier passed to `lfs`.
    pub filesystem: String,
    /// Overrides the built-in local-mode capacity constant when set.
    #[serde(default)]
    pub local_total_size: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BarChartConfig {
    pub filename: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UsagePieChartConfig {
    pub filename: String,
    pub num_top_groups: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TransferConfig {
    /// rsync destination, e.g. `user@host:/srv/reports`.
    pub target: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub execution: ExecutionConfig,
    pub base_chart: BaseChartConfig,
    pub storage: StorageConfig,
    pub quota_pct_bar_chart: BarChartConfig,
    pub usage_quota_bar_chart: BarChartConfig,
    pub usage_pie_chart: UsagePieChartConfig,
    #[serde(default)]
    pub transfer: Option<TransferConfig>,
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_path = path.as_ref();
        debug!("Loading configuration from {}", config_path.display());

        let config = Config::builder()
            .add_source(
                File::with_name(config_path.to_str().unwrap_or("")).format(FileFormat::Ini),
            )
            .build()
            .context(format!(
                "Failed to load config from {}",
                config_path.display()
            ))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize config")?;

        Ok(app_config)
    }
}
