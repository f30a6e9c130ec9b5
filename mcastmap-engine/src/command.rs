//! Device command strings
//!
//! The exact IOS command set the engine issues. Kept in one place so the
//! stages and the tests agree on them.

use std::net::Ipv4Addr;

/// Neighbor-advertisement dump used by the crawler
pub const SHOW_NEIGHBORS: &str = "show cdp neighbors detail";

/// Multicast routing entry for a (source, group) pair
pub fn show_mroute(source: Ipv4Addr, group: Ipv4Addr) -> String {
    format!("show ip mroute {source} {group}")
}

/// Packet counters for a (source, group) pair
pub fn show_mroute_count(source: Ipv4Addr, group: Ipv4Addr) -> String {
    format!("show ip mroute {source} {group} count")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mroute_commands_format_source_then_group() {
        let source: Ipv4Addr = "1.1.1.1".parse().unwrap();
        let group: Ipv4Addr = "239.1.1.1".parse().unwrap();
        assert_eq!(show_mroute(source, group), "show ip mroute 1.1.1.1 239.1.1.1");
        assert_eq!(
            show_mroute_count(source, group),
            "show ip mroute 1.1.1.1 239.1.1.1 count"
        );
    }
}
