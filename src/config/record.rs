use crate::config::prefix::NetworkPrefix;

/// One device's observation of one link, taken from a single interface block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub source: String,
    pub neighbor: String,
    pub subnet: Option<NetworkPrefix>,
    pub bandwidth_mbps: u64,
}

impl LinkRecord {
    /// Edge label: subnet (or empty) and bandwidth on separate lines.
    pub fn label(&self) -> String {
        let subnet = self.subnet.map(|s| s.to_string()).unwrap_or_default();
        format!("{}\n{} Mbps", subnet, self.bandwidth_mbps)
    }
}
