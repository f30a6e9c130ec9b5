//! Fixed text patterns for device output
//!
//! These patterns are an external protocol shared with the device fleet's
//! IOS output format; they are reproduced exactly, not redesigned. A miss
//! is never an error: every parser returns an `Option` or an empty `Vec`
//! and the calling stage simply records no data for that cycle.

use regex::Regex;
use std::sync::LazyLock;

/// One neighbor block from a `show cdp neighbors detail` dump: a
/// `Device ID:` line, two arbitrary lines, then the `Interface:` line.
/// The remote hostname is captured up to the first literal dot, stripping
/// any trailing domain suffix.
static NEIGHBOR_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Device ID:\s(\S+?)(?:\.\S+)?\n.*\n.*\n.*Interface:\s(\S+),\D+port\):\s(\S+)")
        .expect("neighbor block pattern is valid")
});

/// Colon-prefixed token followed by `, RPF` marks the RPF interface
static RPF_INTERFACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s(\S+),\sRPF").expect("RPF pattern is valid"));

/// Any token followed by `, For` marks a forwarding interface
static FORWARDING_INTERFACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+(\S+),\sFor").expect("forwarding pattern is valid"));

/// Packet counter pair on a `show ip mroute ... count` line
static PACKET_COUNTERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r", Packets forwarded: (\d+), Packets received: (\d+)")
        .expect("counter pattern is valid")
});

/// One parsed adjacency tuple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborEntry {
    /// Neighbor hostname, domain suffix stripped
    pub remote_host: String,
    /// Our interface facing the neighbor
    pub local_interface: String,
    /// The neighbor's interface facing us
    pub remote_interface: String,
}

/// Extract every neighbor block from a neighbor-advertisement dump.
///
/// Zero matches means the device advertises no neighbors, which is not an
/// error.
pub fn neighbor_entries(output: &str) -> Vec<NeighborEntry> {
    NEIGHBOR_BLOCK
        .captures_iter(output)
        .map(|caps| NeighborEntry {
            remote_host: caps[1].to_string(),
            local_interface: caps[2].to_string(),
            remote_interface: caps[3].to_string(),
        })
        .collect()
}

/// The single RPF interface named by a multicast routing entry.
///
/// Only the first match is meaningful even if the pattern recurs.
pub fn rpf_interface(output: &str) -> Option<String> {
    RPF_INTERFACE
        .captures(output)
        .map(|caps| caps[1].to_string())
}

/// Every forwarding interface named by a multicast routing entry, in order
pub fn forwarding_interfaces(output: &str) -> Vec<String> {
    FORWARDING_INTERFACE
        .captures_iter(output)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// One packet-counter sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSample {
    pub forwarded: u64,
    pub received: u64,
}

/// Parse the first packet-counter pair from a counter dump.
///
/// A malformed integer collapses to `None`, the same as no match at all.
pub fn counter_sample(output: &str) -> Option<CounterSample> {
    let caps = PACKET_COUNTERS.captures(output)?;
    let forwarded = caps[1].parse().ok()?;
    let received = caps[2].parse().ok()?;
    Some(CounterSample {
        forwarded,
        received,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CDP_TWO_NEIGHBORS: &str = "\
-------------------------
Device ID: RTR-B.corp.example.com
Entry address(es):
  IP address: 10.0.0.2
Interface: GigabitEthernet0/1,  Port ID (outgoing port): GigabitEthernet0/2
Holdtime : 155 sec

-------------------------
Device ID: SEA-EDGE
Entry address(es):
  IP address: 10.0.0.6
Interface: GigabitEthernet0/3,  Port ID (outgoing port): TenGigabitEthernet1/1
Holdtime : 142 sec
";

    const MROUTE_ENTRY: &str = "\
(1.1.1.1, 239.1.1.1), 00:12:10/00:03:22, flags: T
  Incoming interface: GigabitEthernet0/1, RPF nbr 10.0.0.1
  Outgoing interface list:
    GigabitEthernet0/2, Forward/Sparse, 00:12:10/00:03:22
    GigabitEthernet0/3, Forward/Sparse, 00:08:01/00:02:44
";

    #[test]
    fn neighbor_entries_strip_domain_suffix() {
        let entries = neighbor_entries(CDP_TWO_NEIGHBORS);
        assert_eq!(
            entries,
            vec![
                NeighborEntry {
                    remote_host: "RTR-B".to_string(),
                    local_interface: "GigabitEthernet0/1".to_string(),
                    remote_interface: "GigabitEthernet0/2".to_string(),
                },
                NeighborEntry {
                    remote_host: "SEA-EDGE".to_string(),
                    local_interface: "GigabitEthernet0/3".to_string(),
                    remote_interface: "TenGigabitEthernet1/1".to_string(),
                },
            ]
        );
    }

    #[test]
    fn neighbor_entries_on_unrelated_text_is_empty() {
        assert!(neighbor_entries("% CDP is not enabled\n").is_empty());
        assert!(neighbor_entries("").is_empty());
    }

    #[test]
    fn rpf_interface_takes_first_match_only() {
        assert_eq!(
            rpf_interface(MROUTE_ENTRY).as_deref(),
            Some("GigabitEthernet0/1")
        );

        let doubled = format!("{MROUTE_ENTRY}{MROUTE_ENTRY}");
        assert_eq!(
            rpf_interface(&doubled).as_deref(),
            Some("GigabitEthernet0/1")
        );
    }

    #[test]
    fn forwarding_interfaces_collects_all_matches() {
        assert_eq!(
            forwarding_interfaces(MROUTE_ENTRY),
            vec!["GigabitEthernet0/2", "GigabitEthernet0/3"]
        );
    }

    #[test]
    fn mroute_miss_yields_no_interfaces() {
        let miss = "Group 239.9.9.9 not found\n";
        assert_eq!(rpf_interface(miss), None);
        assert!(forwarding_interfaces(miss).is_empty());
    }

    #[test]
    fn counter_sample_parses_first_pair() {
        let output = "\
Group: 239.1.1.1, Source count: 1, Packets forwarded: 140, Packets received: 50
  Source: 1.1.1.1/32, Forwarding: 140/2/100/1, Packets forwarded: 9, Packets received: 9
";
        assert_eq!(
            counter_sample(output),
            Some(CounterSample {
                forwarded: 140,
                received: 50
            })
        );
    }

    #[test]
    fn counter_sample_miss_is_none() {
        assert_eq!(counter_sample("Group 239.1.1.1 not found\n"), None);
        assert_eq!(counter_sample(""), None);
    }
}
