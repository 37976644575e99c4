use chrono::NaiveDate;

/// One accounting entry of a filesystem group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    pub name: String,
    /// Used space in bytes.
    pub size: u64,
    /// Quota limit in bytes.
    pub quota: u64,
}

impl GroupInfo {
    pub fn new(name: impl Into<String>, size: u64, quota: u64) -> Self {
        Self {
            name: name.into(),
            size,
            quota,
        }
    }

    /// Used space as a percentage of the quota limit. Groups without a
    /// quota limit report 0.
    pub fn quota_pct(&self) -> f64 {
        if self.quota == 0 {
            0.0
        } else {
            (self.size as f64 / self.quota as f64) * 100.0
        }
    }
}

/// Dated usage sample of one group, input for trend charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsagePoint {
    pub date: NaiveDate,
    /// Used space in bytes at that date.
    pub size: u64,
}

/// Usage history of one group over a date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupUsageSeries {
    pub name: String,
    pub points: Vec<UsagePoint>,
}
