//! Bifurcation annotator
//!
//! Pure function of the already-classified role flags; no device
//! communication and no failure modes. A device where the tree replicates
//! onto more than one outgoing interface is a bifurcation point.

use mcastmap_core::TopologyGraph;
use tracing::debug;

/// Mark every host with more than one outgoing interface as a bifurcation
/// point
pub fn annotate_bifurcations(graph: &mut TopologyGraph) {
    for (host, device) in graph.iter_mut() {
        device.bifurcation_point = device.outgoing_count() > 1;
        if device.bifurcation_point {
            debug!(host = %host, outgoing = device.outgoing_count(), "bifurcation point");
        }
    }
}
