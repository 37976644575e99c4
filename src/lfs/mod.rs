use anyhow::{bail, Context, Result};
use log::debug;
use std::process::Command;

/// Queries the total capacity of a Lustre filesystem in bytes via `lfs df`.
pub fn lustre_total_size(filesystem: &str) -> Result<u64> {
    let output = Command::new("lfs")
        .args(["df", filesystem])
        .output()
        .with_context(|| format!("Failed to run lfs df for {filesystem}"))?;

    if !output.status.success() {
        bail!(
            "lfs df for {filesystem} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let total_size = parse_df_total(&stdout)
        .with_context(|| format!("Failed to parse lfs df output for {filesystem}"))?;

    debug!("Total size of {filesystem}: {total_size} bytes");
    Ok(total_size)
}

/// Extracts the total capacity in bytes from `lfs df` output. The summary
/// line reports 1K blocks: `filesystem_summary: <total> <used> <avail> ...`.
fn parse_df_total(output: &str) -> Result<u64> {
    for line in output.lines() {
        if let Some(rest) = line.strip_prefix("filesystem_summary:") {
            let total_kib: u64 = rest
                .split_whitespace()
                .next()
                .context("missing total column in filesystem_summary line")?
                .parse()
                .context("invalid total column in filesystem_summary line")?;
            return Ok(total_kib * 1024);
        }
    }

    bail!("no filesystem_summary line in lfs df output: {output:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    const LFS_DF_OUTPUT: &str = "\
UUID                 1K-blocks        Used   Available Use% Mounted on
test-MDT0000_UUID      1819458       45678     1651324   3% /lustre/test[MDT:0]
test-OST0000_UUID     47185920    23592960    23592960  50% /lustre/test[OST:0]
test-OST0001_UUID     47185920    11796480    35389440  25% /lustre/test[OST:1]

filesystem_summary:   94371840    35389440    58982400  38% /lustre/test
";

    #[test]
    fn test_parse_df_total() {
        let total = parse_df_total(LFS_DF_OUTPUT).unwrap();
        assert_eq!(total, 94_371_840 * 1024);
    }

    #[test]
    fn test_parse_df_total_without_summary() {
        assert!(parse_df_total("UUID 1K-blocks Used Available\n").is_err());
        assert!(parse_df_total("").is_err());
    }

    #[test]
    fn test_parse_df_total_bad_column() {
        assert!(parse_df_total("filesystem_summary: abc 1 2 3\n").is_err());
        assert!(parse_df_total("filesystem_summary:\n").is_err());
    }
}
