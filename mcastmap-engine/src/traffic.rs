//! Traffic sampler
//!
//! Two-point rate measurement per device: fetch the multicast entry's
//! packet counters, wait exactly the configured interval, fetch them again,
//! and mark interfaces whose relevant counter moved. Devices sample on
//! independent timers, so one slow or unreachable device never stretches
//! another device's interval.
//!
//! Fail-open policy, kept for compatibility with the fleet's established
//! tooling: a sample that fails to parse reads as zero deltas. The
//! tri-state `active_traffic` field keeps "never sampled" distinguishable
//! from "sampled and idle" for library callers.

use crate::command;
use crate::parse;
use crate::report::{DeviceFailure, Stage};
use mcastmap_core::{DeviceRecord, DeviceSession, Error, Result, RunFlag, TopologyGraph};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Counter deltas observed on one device between the two samples
#[derive(Debug, Clone, Copy, Default)]
struct CounterDeltas {
    forwarded: i64,
    received: i64,
}

/// Per-device two-sample traffic measurement
pub struct TrafficSampler {
    session: Arc<dyn DeviceSession>,
    source: Ipv4Addr,
    group: Ipv4Addr,
    interval: Duration,
    concurrency: usize,
}

impl TrafficSampler {
    pub fn new(
        session: Arc<dyn DeviceSession>,
        source: Ipv4Addr,
        group: Ipv4Addr,
        interval: Duration,
        concurrency: usize,
    ) -> Self {
        Self {
            session,
            source,
            group,
            interval,
            concurrency: concurrency.max(1),
        }
    }

    /// Sample every device and mark interfaces carrying active traffic.
    ///
    /// Mutates the graph in place; a device whose sampling fails outright
    /// is recorded and its interfaces keep their unknown activity state.
    pub async fn sample(
        &self,
        graph: &mut TopologyGraph,
        run: &RunFlag,
    ) -> Result<Vec<DeviceFailure>> {
        let hosts: Vec<String> = graph.hosts().cloned().collect();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let command = command::show_mroute_count(self.source, self.group);
        let interval = self.interval;

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
                let outcome = sample_device(&*session, &host, &command, interval).await;
                (host, Some(outcome))
            }));
        }

        let mut failures = Vec::new();
        for worker in workers {
            let (host, outcome) = worker
                .await
                .map_err(|e| Error::Interrupted(format!("sampler worker failed: {e}")))?;
            match outcome {
                // Cancelled before sampling; activity stays unknown
                None => {}
                Some(Ok(deltas)) => {
                    debug!(host = %host, forwarded = deltas.forwarded, received = deltas.received,
                        "sampled device");
                    if let Some(device) = graph.device_mut(&host) {
                        apply_deltas(device, deltas);
                    }
                }
                Some(Err(err)) => {
                    warn!(host = %host, error = %err, "counter sampling failed, activity unknown");
                    failures.push(DeviceFailure::new(host, Stage::Traffic, err));
                }
            }
        }

        if !run.is_running() {
            return Err(Error::Interrupted("traffic sampling cancelled".into()));
        }
        Ok(failures)
    }
}

/// Take the two time-separated counter samples for one device.
///
/// A sample that returns no matching counter line collapses to zero deltas
/// rather than an error.
async fn sample_device(
    session: &dyn DeviceSession,
    host: &str,
    command: &str,
    interval: Duration,
) -> Result<CounterDeltas> {
    let first = parse::counter_sample(&session.send(host, command).await?);
    tokio::time::sleep(interval).await;
    let second = parse::counter_sample(&session.send(host, command).await?);

    match (first, second) {
        (Some(a), Some(b)) => Ok(CounterDeltas {
            forwarded: b.forwarded as i64 - a.forwarded as i64,
            received: b.received as i64 - a.received as i64,
        }),
        _ => Ok(CounterDeltas::default()),
    }
}

/// The incoming role is checked first; an interface with neither role is
/// left untouched
fn apply_deltas(device: &mut DeviceRecord, deltas: CounterDeltas) {
    for record in device.interfaces.values_mut() {
        if record.incoming {
            record.active_traffic = Some(deltas.received > 0);
        } else if record.outgoing {
            record.active_traffic = Some(deltas.forwarded > 0);
        }
    }
}
