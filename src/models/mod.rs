pub(crate) mod group;

pub use group::{GroupInfo, GroupUsageSeries, UsagePoint};
