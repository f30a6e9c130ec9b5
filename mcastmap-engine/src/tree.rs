//! Multicast tree builder
//!
//! For every discovered device, fetches the multicast routing entry for the
//! configured (source, group) pair and classifies each local interface as
//! incoming (the single RPF interface) or outgoing (zero or more forwarding
//! interfaces). A parse miss leaves both role flags unset for that device;
//! interfaces the device names but the crawl never saw are ignored, never
//! invented.
//!
//! Classification is idempotent: re-running it with the same inputs yields
//! the same flags.

use crate::command;
use crate::parse;
use crate::report::{DeviceFailure, Stage};
use mcastmap_core::{DeviceRecord, DeviceSession, Error, Result, RunFlag, TopologyGraph};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Roles parsed from one device's multicast routing entry
#[derive(Debug, Clone, Default)]
struct MrouteRoles {
    rpf: Option<String>,
    forwarding: Vec<String>,
}

impl MrouteRoles {
    fn parse(output: &str) -> Self {
        Self {
            rpf: parse::rpf_interface(output),
            forwarding: parse::forwarding_interfaces(output),
        }
    }
}

/// Per-device role classification for one multicast entry
pub struct TreeBuilder {
    session: Arc<dyn DeviceSession>,
    source: Ipv4Addr,
    group: Ipv4Addr,
    concurrency: usize,
}

impl TreeBuilder {
    pub fn new(
        session: Arc<dyn DeviceSession>,
        source: Ipv4Addr,
        group: Ipv4Addr,
        concurrency: usize,
    ) -> Self {
        Self {
            session,
            source,
            group,
            concurrency: concurrency.max(1),
        }
    }

    /// Classify every interface in the graph against the multicast entry.
    ///
    /// Mutates the graph in place; per-device fetch failures are recorded
    /// and that device's flags stay unset.
    pub async fn classify(
        &self,
        graph: &mut TopologyGraph,
        run: &RunFlag,
    ) -> Result<Vec<DeviceFailure>> {
        let hosts: Vec<String> = graph.hosts().cloned().collect();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let command = command::show_mroute(self.source, self.group);

        let mut workers = Vec::with_capacity(hosts.len());
        for host in hosts {
            let semaphore = Arc::clone(&semaphore);
            let session = Arc::clone(&self.session);
            let command = command.clone();
            let run = run.clone();
            workers.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return (host, None),
                };
                if !run.is_running() {
                    return (host, None);
                }
                let outcome = session
                    .send(&host, &command)
                    .await
                    .map(|text| MrouteRoles::parse(&text));
                (host, Some(outcome))
            }));
        }

        let mut failures = Vec::new();
        for worker in workers {
            let (host, outcome) = worker
                .await
                .map_err(|e| Error::Interrupted(format!("tree worker failed: {e}")))?;
            match outcome {
                // Cancelled before the fetch; flags stay unset
                None => {}
                Some(Ok(roles)) => {
                    debug!(host = %host, rpf = ?roles.rpf, outgoing = roles.forwarding.len(),
                        "classified device");
                    if let Some(device) = graph.device_mut(&host) {
                        apply_roles(device, &roles);
                    }
                }
                Some(Err(err)) => {
                    warn!(host = %host, error = %err, "mroute fetch failed, roles left unset");
                    failures.push(DeviceFailure::new(host, Stage::Tree, err));
                }
            }
        }

        if !run.is_running() {
            return Err(Error::Interrupted("tree classification cancelled".into()));
        }
        Ok(failures)
    }
}

/// Only interfaces already known from the crawl are ever updated
fn apply_roles(device: &mut DeviceRecord, roles: &MrouteRoles) {
    for (name, record) in device.interfaces.iter_mut() {
        if roles.rpf.as_deref() == Some(name.as_str()) {
            record.incoming = true;
        }
        if roles.forwarding.iter().any(|out| out == name) {
            record.outgoing = true;
        }
    }
}
