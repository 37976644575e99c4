use crate::config::StorageConfig;
use crate::models::GroupInfo;
use anyhow::{bail, Context, Result};
use log::debug;
use std::collections::HashSet;
use std::process::Command;

/// Total capacity assumed in local/dev runs, roughly 18.5 PB. Used when
/// `storage.local_total_size` is not configured.
pub const LOCAL_MODE_TOTAL_SIZE: u64 = 18_458_963_071_860_736;

/// Fixed synthetic group accounting data for local/dev runs. No I/O.
pub fn create_dummy_group_info_list() -> Vec<GroupInfo> {
    vec![
        GroupInfo::new("alidata", 1_894_424_760_123_392, 2_251_799_813_685_248),
        GroupInfo::new("hades", 913_847_563_211_008, 1_125_899_906_842_624),
        GroupInfo::new("cbm", 2_748_779_069_440_000, 3_377_699_720_527_872),
        GroupInfo::new("panda", 561_374_883_610_624, 1_125_899_906_842_624),
        GroupInfo::new("theory", 1_206_964_700_135_424, 1_688_849_860_263_936),
        GroupInfo::new("astro", 219_902_325_555_200, 562_949_953_421_312),
        GroupInfo::new("biophys", 87_960_930_222_080, 281_474_976_710_656),
        GroupInfo::new("matsci", 439_804_651_110_400, 562_949_953_421_312),
    ]
}

/// Lists all group names known to the system, in `getent group` order and
/// without duplicates.
pub fn get_group_names(storage: &StorageConfig) -> Result<Vec<String>> {
    let output = Command::new("getent")
        .arg("group")
        .output()
        .context("Failed to run getent group")?;

    if !output.status.success() {
        bail!("getent group exited with {}", output.status);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut seen = HashSet::new();
    let names: Vec<String> = stdout
        .lines()
        .filter_map(|line| line.split(':').next())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_string()))
        .map(str::to_owned)
        .collect();

    debug!(
        "Found {} groups for quota accounting on {}",
        names.len(),
        storage.filesystem
    );

    Ok(names)
}

/// Queries used space and quota limit for every given group via
/// `lfs quota`.
pub fn get_group_info_list(names: &[String], storage: &StorageConfig) -> Result<Vec<GroupInfo>> {
    let mut group_info_list = Vec::with_capacity(names.len());

    for name in names {
        let output = Command::new("lfs")
            .args(["quota", "-q", "-g", name, &storage.filesystem])
            .output()
            .with_context(|| format!("Failed to run lfs quota for group {name}"))?;

        if !output.status.success() {
            bail!(
                "lfs quota for group {name} exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let (size, quota) = parse_group_quota(&stdout)
            .with_context(|| format!("Failed to parse lfs quota output for group {name}"))?;

        debug!("Group {name}: size={size} quota={quota}");
        group_info_list.push(GroupInfo::new(name.clone(), size, quota));
    }

    Ok(group_info_list)
}

/// Parses `lfs quota -q` output into (used bytes, quota limit bytes).
///
/// The block quota columns are `<filesystem> <kbytes> <quota> <limit> ...`,
/// all in KiB; a trailing `*` marks exceeded values. Long filesystem paths
/// wrap onto their own line, so parsing is token based.
fn parse_group_quota(output: &str) -> Result<(u64, u64)> {
    let tokens: Vec<&str> = output.split_whitespace().collect();

    if tokens.len() < 4 {
        bail!("unexpected lfs quota output: {output:?}");
    }

    let used_kib: u64 = tokens[1]
        .trim_end_matches('*')
        .parse()
        .with_context(|| format!("invalid kbytes field: {}", tokens[1]))?;
    let soft_kib: u64 = tokens[2]
        .trim_end_matches('*')
        .parse()
        .with_context(|| format!("invalid quota field: {}", tokens[2]))?;
    let hard_kib: u64 = tokens[3]
        .trim_end_matches('*')
        .parse()
        .with_context(|| format!("invalid limit field: {}", tokens[3]))?;

    // Hard limit is authoritative, soft limit is the fallback.
    let quota_kib = if hard_kib > 0 { hard_kib } else { soft_kib };

    Ok((used_kib * 1024, quota_kib * 1024))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_dummy_group_info_list() {
        let groups = create_dummy_group_info_list();

        assert_eq!(groups.len(), 8);

        let names: HashSet<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names.len(), groups.len(), "group names must be unique");

        for group in &groups {
            assert!(group.size > 0);
            assert!(group.quota >= group.size);
        }
    }

    #[test]
    fn test_parse_group_quota() {
        let output = "/lustre/test  1024  2048  4096  -  17  0  0  -\n";
        let (size, quota) = parse_group_quota(output).unwrap();
        assert_eq!(size, 1024 * 1024);
        assert_eq!(quota, 4096 * 1024);
    }

    #[test]
    fn test_parse_group_quota_wrapped_filesystem_line() {
        let output = "/lustre/some/very/long/mount/point\n  512  0  1024  -  3  0  0  -\n";
        let (size, quota) = parse_group_quota(output).unwrap();
        assert_eq!(size, 512 * 1024);
        assert_eq!(quota, 1024 * 1024);
    }

    #[test]
    fn test_parse_group_quota_exceeded_marker() {
        let output = "/lustre/test  4097*  2048  4096  6d  17  0  0  -\n";
        let (size, quota) = parse_group_quota(output).unwrap();
        assert_eq!(size, 4097 * 1024);
        assert_eq!(quota, 4096 * 1024);
    }

    #[test]
    fn test_parse_group_quota_soft_limit_fallback() {
        let output = "/lustre/test  100  2048  0  -  17  0  0  -\n";
        let (_, quota) = parse_group_quota(output).unwrap();
        assert_eq!(quota, 2048 * 1024);
    }

    #[test]
    fn test_parse_group_quota_garbage() {
        assert!(parse_group_quota("").is_err());
        assert!(parse_group_quota("/lustre/test").is_err());
        assert!(parse_group_quota("/lustre/test abc def ghi").is_err());
    }
}
