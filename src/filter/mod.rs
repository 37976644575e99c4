use crate::models::GroupInfo;
use log::debug;

/// Administrative and service groups that never own scientific data and are
/// excluded from every report.
const SYSTEM_GROUPS: &[&str] = &[
    "root", "bin", "daemon", "sys", "adm", "tty", "disk", "lp", "mem", "kmem", "wheel", "cdrom",
    "mail", "man", "dialout", "floppy", "games", "tape", "video", "ftp", "lock", "audio", "users",
    "nobody", "utmp", "utempter", "input", "render", "ssh_keys", "systemd-journal",
    "systemd-network", "systemd-resolve", "sshd", "chrony", "postfix", "nscd",
];

/// Drops system groups from a raw group name list.
pub fn filter_system_groups(names: Vec<String>) -> Vec<String> {
    let before = names.len();
    let names: Vec<String> = names
        .into_iter()
        .filter(|name| !SYSTEM_GROUPS.contains(&name.as_str()))
        .collect();

    debug!("Filtered {} system groups", before - names.len());
    names
}

/// Drops accounting records that carry no usage, so empty groups do not
/// clutter the charts.
pub fn filter_group_info_items(items: Vec<GroupInfo>) -> Vec<GroupInfo> {
    let before = items.len();
    let items: Vec<GroupInfo> = items.into_iter().filter(|item| item.size > 0).collect();

    debug!("Filtered {} groups without usage", before - items.len());
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_system_groups() {
        let names = vec![
            "root".to_string(),
            "hades".to_string(),
            "wheel".to_string(),
            "cbm".to_string(),
            "systemd-journal".to_string(),
        ];

        let filtered = filter_system_groups(names);
        assert_eq!(filtered, vec!["hades".to_string(), "cbm".to_string()]);
    }

    #[test]
    fn test_filter_system_groups_keeps_order() {
        let names = vec!["cbm".to_string(), "alidata".to_string(), "hades".to_string()];
        assert_eq!(filter_system_groups(names.clone()), names);
    }

    #[test]
    fn test_filter_group_info_items() {
        let items = vec![
            GroupInfo::new("hades", 100, 200),
            GroupInfo::new("empty", 0, 200),
            GroupInfo::new("cbm", 50, 0),
        ];

        let filtered = filter_group_info_items(items);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].name, "hades");
        assert_eq!(filtered[1].name, "cbm");
    }
}
