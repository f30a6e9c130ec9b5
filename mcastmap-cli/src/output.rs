//! JSON artifact writer
//!
//! The finished graph is the contract with any downstream visualizer: a
//! pretty-printed JSON document named `multicastMapOutput-<timestamp>.json`
//! in the chosen directory.

use chrono::Local;
use mcastmap_core::{Result, TopologyGraph};
use std::fs;
use std::path::{Path, PathBuf};

/// Serialize the graph into `dir` and return the path written
pub fn write_artifact(graph: &TopologyGraph, dir: &Path) -> Result<PathBuf> {
    let stamp = Local::now().format("%Y-%m-%d-%H%M%S");
    let path = dir.join(format!("multicastMapOutput-{stamp}.json"));
    let document = serde_json::to_string_pretty(graph)?;
    fs::write(&path, document)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcastmap_core::InterfaceRecord;
    use std::collections::BTreeMap;

    #[test]
    fn writes_a_parseable_document_with_the_expected_name() {
        let mut interfaces = BTreeMap::new();
        interfaces.insert("Gi0/1".to_string(), InterfaceRecord::new("RTR-B", "Gi0/2"));
        let mut graph = TopologyGraph::new();
        graph.insert_device("SEA-CORE", interfaces);

        let dir = tempfile::tempdir().unwrap();
        let path = write_artifact(&graph, dir.path()).unwrap();

        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("multicastMapOutput-"));
        assert!(name.ends_with(".json"));

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["SEA-CORE"]["Gi0/1"]["Remote Hostname"], "RTR-B");
    }
}
