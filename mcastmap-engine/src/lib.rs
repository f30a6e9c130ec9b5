//! Mcastmap Engine
//!
//! Discovers a network's physical topology from CDP neighbor advertisements
//! and overlays live multicast-distribution-tree state onto it: which
//! interface on each device receives traffic for a (source, group) entry,
//! which interfaces forward it, where the tree branches, and which branches
//! currently carry traffic.
//!
//! The engine runs four stages in strict sequence over a shared
//! [`TopologyGraph`](mcastmap_core::TopologyGraph):
//!
//! 1. [`Crawler`] — breadth-first discovery of devices and adjacency
//! 2. [`TreeBuilder`] — per-device RPF / forwarding classification
//! 3. [`TrafficSampler`] — two-point packet-counter rate measurement
//! 4. [`annotate_bifurcations`] — host-level branch detection, no I/O
//!
//! Within a stage, per-device work fans out with bounded concurrency; a
//! single unreachable device is recorded in the run report rather than
//! aborting its siblings. [`Pipeline`] drives all four stages.

pub mod bifurcation;
pub mod command;
pub mod crawler;
pub mod parse;
pub mod pipeline;
pub mod report;
pub mod traffic;
pub mod tree;

pub use bifurcation::annotate_bifurcations;
pub use crawler::Crawler;
pub use pipeline::{MapperConfig, Pipeline};
pub use report::{DeviceFailure, RunReport, Stage};
pub use traffic::TrafficSampler;
pub use tree::TreeBuilder;
