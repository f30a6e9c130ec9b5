//! Run report and per-device failure records
//!
//! Per-device errors never propagate into the graph structure; they are
//! collected in a side list so the caller can distinguish "device answered
//! with no data" from "device never answered".

use mcastmap_core::TopologyGraph;
use std::fmt;

/// Pipeline stage that observed a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Topology crawl
    Crawl,
    /// Tree classification
    Tree,
    /// Traffic sampling
    Traffic,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Crawl => write!(f, "crawl"),
            Stage::Tree => write!(f, "tree"),
            Stage::Traffic => write!(f, "traffic"),
        }
    }
}

/// One device that failed during a stage
#[derive(Debug, Clone)]
pub struct DeviceFailure {
    /// Device hostname
    pub host: String,
    /// Stage the failure happened in
    pub stage: Stage,
    /// Human-readable cause
    pub error: String,
}

impl DeviceFailure {
    pub fn new<H: Into<String>, E: fmt::Display>(host: H, stage: Stage, error: E) -> Self {
        Self {
            host: host.into(),
            stage,
            error: error.to_string(),
        }
    }
}

impl fmt::Display for DeviceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.host, self.error)
    }
}

/// Result of a full mapping run: the annotated graph plus every isolated
/// per-device failure
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// The annotated topology graph
    pub graph: TopologyGraph,
    /// Devices that failed, in the order their failures were observed
    pub failures: Vec<DeviceFailure>,
}

impl RunReport {
    /// True if every contacted device answered every cycle
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
