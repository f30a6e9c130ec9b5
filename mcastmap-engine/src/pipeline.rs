//! Pipeline driver
//!
//! Runs the four stages in strict sequence over one owned graph: crawl,
//! classify, sample, annotate. A stage only starts once the previous
//! stage's entire graph mutation has completed, and the run flag is checked
//! at every stage boundary.

use crate::bifurcation::annotate_bifurcations;
use crate::crawler::Crawler;
use crate::report::RunReport;
use crate::traffic::TrafficSampler;
use crate::tree::TreeBuilder;
use mcastmap_core::{DeviceSession, Error, Result, RunFlag};
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Sampling interval matching the fleet tooling's default
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(5);

/// Default per-stage device fan-out
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Protocol parameters for one mapping run
#[derive(Debug, Clone, Copy)]
pub struct MapperConfig {
    /// Multicast source address
    pub source_ip: Ipv4Addr,
    /// Multicast group address
    pub group_ip: Ipv4Addr,
    /// Delay between the two counter samples
    pub sample_interval: Duration,
    /// Maximum in-flight device operations per stage
    pub concurrency: usize,
}

impl MapperConfig {
    /// Create a config with default interval and fan-out
    pub fn new(source_ip: Ipv4Addr, group_ip: Ipv4Addr) -> Self {
        Self {
            source_ip,
            group_ip,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Set the sampling interval
    pub fn with_sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    /// Set the per-stage fan-out
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

/// Drives a complete mapping run
pub struct Pipeline {
    session: Arc<dyn DeviceSession>,
    config: MapperConfig,
}

impl Pipeline {
    pub fn new(session: Arc<dyn DeviceSession>, config: MapperConfig) -> Self {
        Self { session, config }
    }

    /// Crawl from `seed`, then annotate the discovered graph with multicast
    /// roles, traffic activity, and bifurcation points.
    pub async fn run(&self, seed: &str, run: &RunFlag) -> Result<RunReport> {
        let cfg = &self.config;

        info!(seed = %seed, source = %cfg.source_ip, group = %cfg.group_ip, "starting mapping run");
        let crawler = Crawler::new(Arc::clone(&self.session), cfg.concurrency);
        let (mut graph, mut failures) = crawler.discover(seed, run).await?;
        self.checkpoint(run, "crawl")?;

        let builder = TreeBuilder::new(
            Arc::clone(&self.session),
            cfg.source_ip,
            cfg.group_ip,
            cfg.concurrency,
        );
        failures.extend(builder.classify(&mut graph, run).await?);
        self.checkpoint(run, "classify")?;

        let sampler = TrafficSampler::new(
            Arc::clone(&self.session),
            cfg.source_ip,
            cfg.group_ip,
            cfg.sample_interval,
            cfg.concurrency,
        );
        failures.extend(sampler.sample(&mut graph, run).await?);
        self.checkpoint(run, "sample")?;

        annotate_bifurcations(&mut graph);

        info!(
            devices = graph.len(),
            failed = failures.len(),
            "mapping run complete"
        );
        Ok(RunReport { graph, failures })
    }

    fn checkpoint(&self, run: &RunFlag, after: &str) -> Result<()> {
        if run.is_running() {
            Ok(())
        } else {
            Err(Error::Interrupted(format!("run cancelled after {after}")))
        }
    }
}
