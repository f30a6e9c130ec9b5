//! Topology graph data model
//!
//! The graph is built once per run and mutated in four passes: the crawler
//! creates device and interface records, the tree builder sets the role
//! flags, the traffic sampler sets the activity flag, and the bifurcation
//! annotator sets the host-level flag. Nothing is ever deleted.
//!
//! Serialization follows the sparse-field artifact schema consumed by the
//! downstream visualizer: boolean fields appear only when true, under the
//! keys `Remote Hostname`, `Remote Interface`, `Incoming Interface`,
//! `Outgoing Interface`, `Active Traffic`, and a host-level
//! `Bifurcation Point`.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

/// One local interface on a device, with everything the pipeline learned
/// about it
#[derive(Debug, Clone, Serialize)]
pub struct InterfaceRecord {
    /// Neighbor device reachable via this interface
    #[serde(rename = "Remote Hostname")]
    pub remote_host: String,

    /// The neighbor's interface facing back at us
    #[serde(rename = "Remote Interface")]
    pub remote_interface: String,

    /// True if this is the RPF interface for the multicast entry
    #[serde(rename = "Incoming Interface", skip_serializing_if = "is_false")]
    pub incoming: bool,

    /// True if this interface forwards the multicast entry
    #[serde(rename = "Outgoing Interface", skip_serializing_if = "is_false")]
    pub outgoing: bool,

    /// `None` until sampled (or when the sample failed), `Some(false)` when
    /// sampled and idle, `Some(true)` when a positive counter delta was
    /// observed on the relevant direction
    #[serde(rename = "Active Traffic", skip_serializing_if = "is_not_active")]
    pub active_traffic: Option<bool>,
}

fn is_false(v: &bool) -> bool {
    !*v
}

fn is_not_active(v: &Option<bool>) -> bool {
    !matches!(v, Some(true))
}

impl InterfaceRecord {
    /// Create a record fresh from a neighbor advertisement; role and
    /// activity flags start unset
    pub fn new<H: Into<String>, I: Into<String>>(remote_host: H, remote_interface: I) -> Self {
        Self {
            remote_host: remote_host.into(),
            remote_interface: remote_interface.into(),
            incoming: false,
            outgoing: false,
            active_traffic: None,
        }
    }

    /// True if either role flag is set
    pub fn has_role(&self) -> bool {
        self.incoming || self.outgoing
    }
}

/// A discovered device: its interface map plus host-level annotations
#[derive(Debug, Clone, Default)]
pub struct DeviceRecord {
    /// Interfaces keyed by local interface name
    pub interfaces: BTreeMap<String, InterfaceRecord>,

    /// True if the multicast tree branches at this device
    pub bifurcation_point: bool,
}

impl DeviceRecord {
    /// Number of interfaces currently forwarding the multicast entry
    pub fn outgoing_count(&self) -> usize {
        self.interfaces.values().filter(|i| i.outgoing).count()
    }
}

// The artifact schema puts `Bifurcation Point` at the same nesting level as
// the interface names, so the device record serializes as a single map.
impl Serialize for DeviceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let extra = usize::from(self.bifurcation_point);
        let mut map = serializer.serialize_map(Some(self.interfaces.len() + extra))?;
        for (name, record) in &self.interfaces {
            map.serialize_entry(name, record)?;
        }
        if self.bifurcation_point {
            map.serialize_entry("Bifurcation Point", &true)?;
        }
        map.end()
    }
}

/// Host -> interface adjacency graph for one mapping run
///
/// Invariant on crawl completion: every `remote_host` referenced by any
/// interface is itself a key here, unless that device was unreachable and
/// recorded in the failure side list instead.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TopologyGraph {
    devices: BTreeMap<String, DeviceRecord>,
}

impl TopologyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a device with its crawled interface map, replacing any
    /// previous entry for the host
    pub fn insert_device<H: Into<String>>(
        &mut self,
        host: H,
        interfaces: BTreeMap<String, InterfaceRecord>,
    ) {
        self.devices.insert(
            host.into(),
            DeviceRecord {
                interfaces,
                bifurcation_point: false,
            },
        );
    }

    /// Look up a device record
    pub fn device(&self, host: &str) -> Option<&DeviceRecord> {
        self.devices.get(host)
    }

    /// Look up a device record for mutation
    pub fn device_mut(&mut self, host: &str) -> Option<&mut DeviceRecord> {
        self.devices.get_mut(host)
    }

    /// True if `host` was discovered
    pub fn contains(&self, host: &str) -> bool {
        self.devices.contains_key(host)
    }

    /// Iterate over discovered hostnames
    pub fn hosts(&self) -> impl Iterator<Item = &String> {
        self.devices.keys()
    }

    /// Iterate over devices
    pub fn iter(&self) -> impl Iterator<Item = (&String, &DeviceRecord)> {
        self.devices.iter()
    }

    /// Iterate over devices with mutable records
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut DeviceRecord)> {
        self.devices.iter_mut()
    }

    /// Number of discovered devices
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// True if no device was discovered
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
