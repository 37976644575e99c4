use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "storage-report",
    version,
    about = "Storage report generator for Lustre filesystems"
)]
pub struct Cli {
    #[arg(short = 'f', long, value_name = "PATH", help = "Path of the config file")]
    pub config_file: PathBuf,

    #[arg(short = 'D', long, help = "Enables logging of debug messages")]
    pub enable_debug: bool,

    #[arg(short = 'L', long, help = "Enables local mode program execution")]
    pub enable_local_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["storage-report", "-f", "/etc/report.ini", "-D", "-L"]);
        assert_eq!(cli.config_file, PathBuf::from("/etc/report.ini"));
        assert!(cli.enable_debug);
        assert!(cli.enable_local_mode);
    }

    #[test]
    fn test_flags_default_off() {
        let cli = Cli::parse_from(["storage-report", "--config-file", "report.ini"]);
        assert!(!cli.enable_debug);
        assert!(!cli.enable_local_mode);
    }

    #[test]
    fn test_config_file_is_required() {
        assert!(Cli::try_parse_from(["storage-report"]).is_err());
    }
}
