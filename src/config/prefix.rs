//! IPv4 network prefix derived from an interface's address/mask pair.
//!
//! Example: `ip address 10.0.0.5 255.255.255.0`  =>  `10.0.0.0/24`
//!
//! Masking is non-strict: host bits set in the address are cleared rather than
//! rejected. The mask may be a netmask (`255.255.255.0`) or a hostmask
//! (`0.0.0.255`); netmask interpretation is tried first.

use std::fmt;
use std::net::Ipv4Addr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrefixError {
    #[error("malformed IPv4 address: {0:?}")]
    MalformedAddress(String),

    #[error("mask is neither a netmask nor a hostmask: {0}")]
    InvalidMask(Ipv4Addr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NetworkPrefix {
    pub network: Ipv4Addr,
    pub prefix_len: u8,
}

impl NetworkPrefix {
    /// Build a prefix from dotted-quad address and mask tokens.
    pub fn from_address_mask(address: &str, mask: &str) -> Result<Self, PrefixError> {
        let address = parse_dotted_quad(address)?;
        let mask = parse_dotted_quad(mask)?;
        let prefix_len = prefix_len_from_mask(mask)?;

        Ok(Self {
            network: Ipv4Addr::from(u32::from(address) & mask_bits(prefix_len)),
            prefix_len,
        })
    }
}

impl fmt::Display for NetworkPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

/// Four decimal octets, each in [0, 255].
fn parse_dotted_quad(s: &str) -> Result<Ipv4Addr, PrefixError> {
    s.trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| PrefixError::MalformedAddress(s.to_string()))
}

fn prefix_len_from_mask(mask: Ipv4Addr) -> Result<u8, PrefixError> {
    let m = u32::from(mask);

    // Netmask: ones then zeros.
    if m.leading_ones() + m.trailing_zeros() == 32 {
        return Ok(m.leading_ones() as u8);
    }
    // Hostmask: zeros then ones.
    if m.leading_zeros() + m.trailing_ones() == 32 {
        return Ok(m.leading_zeros() as u8);
    }

    Err(PrefixError::InvalidMask(mask))
}

fn mask_bits(prefix_len: u8) -> u32 {
    match prefix_len {
        0 => 0,
        n => u32::MAX << (32 - u32::from(n.min(32))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn prefix(addr: &str, mask: &str) -> String {
        NetworkPrefix::from_address_mask(addr, mask)
            .unwrap()
            .to_string()
    }

    #[test]
    fn clears_host_bits() {
        assert_eq!(prefix("10.0.0.5", "255.255.255.0"), "10.0.0.0/24");
        assert_eq!(prefix("192.168.1.1", "255.255.255.252"), "192.168.1.0/30");
        assert_eq!(prefix("172.16.33.7", "255.240.0.0"), "172.16.0.0/12");
    }

    #[test]
    fn edge_masks() {
        assert_eq!(prefix("10.1.2.3", "255.255.255.255"), "10.1.2.3/32");
        assert_eq!(prefix("10.1.2.3", "0.0.0.0"), "0.0.0.0/0");
    }

    #[test]
    fn accepts_hostmask() {
        assert_eq!(prefix("10.0.0.5", "0.0.0.255"), "10.0.0.0/24");
        assert_eq!(prefix("10.9.8.7", "0.0.255.255"), "10.9.0.0/16");
    }

    #[test]
    fn rejects_out_of_range_octet() {
        assert_eq!(
            NetworkPrefix::from_address_mask("10.0.0.300", "255.255.255.0"),
            Err(PrefixError::MalformedAddress("10.0.0.300".to_string()))
        );
        assert!(matches!(
            NetworkPrefix::from_address_mask("10.0.0.1", "255.256.255.0"),
            Err(PrefixError::MalformedAddress(_))
        ));
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(matches!(
            NetworkPrefix::from_address_mask("10.0.1", "255.255.255.0"),
            Err(PrefixError::MalformedAddress(_))
        ));
    }

    #[test]
    fn rejects_non_contiguous_mask() {
        assert_eq!(
            NetworkPrefix::from_address_mask("10.0.0.1", "255.0.255.0"),
            Err(PrefixError::InvalidMask(Ipv4Addr::new(255, 0, 255, 0)))
        );
    }
}
