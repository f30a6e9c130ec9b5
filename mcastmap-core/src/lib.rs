//! Mcastmap Core Library
//!
//! This crate provides the fundamental traits, types, and error handling
//! for the mcastmap multicast distribution-tree mapper.

pub mod error;
pub mod graph;
pub mod run;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use graph::{DeviceRecord, InterfaceRecord, TopologyGraph};
pub use run::RunFlag;
pub use session::DeviceSession;
