//! Topology crawler
//!
//! Breadth-first discovery over the "is a CDP neighbor of" relation,
//! starting from one seed device. The frontier is a strict FIFO queue with
//! a visited set checked on dequeue, so traversal order is deterministic by
//! first-discovery time: a host discovered via two different parents is
//! visited exactly once, at its first enqueue position.
//!
//! The coordinator is the single owner of the frontier and visited set.
//! Each wave drains up to `concurrency` hosts, fetches their neighbor
//! dumps concurrently, then applies the results in pop order before the
//! next wave starts, which keeps discovery order reproducible.

use crate::command;
use crate::parse;
use crate::report::{DeviceFailure, Stage};
use futures::future;
use mcastmap_core::{DeviceSession, Error, InterfaceRecord, Result, RunFlag, TopologyGraph};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Breadth-first topology discovery
pub struct Crawler {
    session: Arc<dyn DeviceSession>,
    concurrency: usize,
}

impl Crawler {
    /// Create a crawler over a device session with the given per-wave
    /// fan-out (clamped to at least 1)
    pub fn new(session: Arc<dyn DeviceSession>, concurrency: usize) -> Self {
        Self {
            session,
            concurrency: concurrency.max(1),
        }
    }

    /// Discover every device reachable from `seed`.
    ///
    /// Fails if the seed itself cannot be queried; any other unreachable
    /// device is recorded as a failure and excluded from the graph rather
    /// than aborting the crawl.
    pub async fn discover(
        &self,
        seed: &str,
        run: &RunFlag,
    ) -> Result<(TopologyGraph, Vec<DeviceFailure>)> {
        let mut graph = TopologyGraph::new();
        let mut failures = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut enqueued: HashSet<String> = HashSet::new();
        let mut frontier: VecDeque<String> = VecDeque::new();

        frontier.push_back(seed.to_string());
        enqueued.insert(seed.to_string());

        while !frontier.is_empty() {
            if !run.is_running() {
                return Err(Error::Interrupted("topology crawl cancelled".into()));
            }

            let mut wave = Vec::new();
            while wave.len() < self.concurrency {
                match frontier.pop_front() {
                    Some(host) if visited.contains(&host) => continue,
                    Some(host) => wave.push(host),
                    None => break,
                }
            }

            let fetches = wave.iter().map(|host| {
                let session = Arc::clone(&self.session);
                let host = host.clone();
                async move { session.send(&host, command::SHOW_NEIGHBORS).await }
            });
            let results = future::join_all(fetches).await;

            for (host, result) in wave.into_iter().zip(results) {
                visited.insert(host.clone());
                match result {
                    Ok(text) => {
                        let entries = parse::neighbor_entries(&text);
                        debug!(host = %host, neighbors = entries.len(), "crawled device");

                        let mut interfaces = BTreeMap::new();
                        for entry in entries {
                            if !visited.contains(&entry.remote_host)
                                && enqueued.insert(entry.remote_host.clone())
                            {
                                frontier.push_back(entry.remote_host.clone());
                            }
                            interfaces.insert(
                                entry.local_interface,
                                InterfaceRecord::new(entry.remote_host, entry.remote_interface),
                            );
                        }
                        graph.insert_device(host, interfaces);
                    }
                    Err(err) => {
                        if host == seed {
                            return Err(err);
                        }
                        warn!(host = %host, error = %err, "device unreachable, excluding from crawl");
                        failures.push(DeviceFailure::new(host, Stage::Crawl, err));
                    }
                }
            }
        }

        info!(
            devices = graph.len(),
            failed = failures.len(),
            "topology crawl complete"
        );
        Ok((graph, failures))
    }
}
