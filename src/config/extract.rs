use crate::config::block::{InterfaceBlock, interface_blocks};
use crate::config::prefix::NetworkPrefix;
use crate::config::record::LinkRecord;
use regex::Regex;

/// Field matchers for link-bearing interface blocks.
///
/// Recognized fields (one per line, anywhere in the block):
///  description link to <neighbor>      (case-insensitive)
///  ip address <A.B.C.D> <M.M.M.M>
///  bandwidth <integer>
///
/// Only the description is required; a missing address or bandwidth degrades
/// to "no subnet" / 0 Mbps.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    description: Regex,
    address: Regex,
    bandwidth: Regex,
}

impl LinkExtractor {
    pub fn new() -> anyhow::Result<Self> {
        // Separators are [ \t] so a field never spills onto the next line.
        Ok(Self {
            description: Regex::new(r"(?i)\bdescription[ \t]+link[ \t]+to[ \t]+(\S+)")?,
            address: Regex::new(r"\bip address[ \t]+([0-9.]+)[ \t]+([0-9.]+)")?,
            bandwidth: Regex::new(r"\bbandwidth[ \t]+(\d+)")?,
        })
    }

    /// Lazily yield one record per link-bearing interface block of `text`, in
    /// block order.
    pub fn extract<'a>(
        &'a self,
        device: &'a str,
        text: &'a str,
    ) -> impl Iterator<Item = LinkRecord> + 'a {
        interface_blocks(text).filter_map(move |block| self.link_from_block(device, &block))
    }

    fn link_from_block(&self, device: &str, block: &InterfaceBlock<'_>) -> Option<LinkRecord> {
        let neighbor = self.description.captures(block.body)?.get(1)?.as_str();

        Some(LinkRecord {
            source: device.to_string(),
            neighbor: neighbor.to_string(),
            subnet: self.subnet_of(device, block),
            bandwidth_mbps: self.bandwidth_of(device, block),
        })
    }

    fn subnet_of(&self, device: &str, block: &InterfaceBlock<'_>) -> Option<NetworkPrefix> {
        let caps = self.address.captures(block.body)?;
        let (address, mask) = (caps.get(1)?.as_str(), caps.get(2)?.as_str());

        match NetworkPrefix::from_address_mask(address, mask) {
            Ok(prefix) => Some(prefix),
            Err(e) => {
                log::warn!(
                    "{} interface {}: ignoring ip address {} {}: {}",
                    device,
                    block.name,
                    address,
                    mask,
                    e
                );
                None
            }
        }
    }

    fn bandwidth_of(&self, device: &str, block: &InterfaceBlock<'_>) -> u64 {
        let Some(caps) = self.bandwidth.captures(block.body) else {
            return 0;
        };
        let raw = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        raw.parse().unwrap_or_else(|_| {
            log::warn!(
                "{} interface {}: bandwidth {} out of range, using 0",
                device,
                block.name,
                raw
            );
            0
        })
    }
}
