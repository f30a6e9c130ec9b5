//! Device session trait
//!
//! The pipeline stages never talk to a device directly; they go through
//! [`DeviceSession`], which hides the transport (SSH in production, scripted
//! text in tests). An implementation owns its credentials and connection
//! policy; the engine only hands it a hostname and a command string.

use crate::Result;
use async_trait::async_trait;

/// A command/response session to managed network devices
#[async_trait]
pub trait DeviceSession: Send + Sync {
    /// Execute `command` on `host` and return the raw text response.
    ///
    /// Fails with [`crate::Error::Connectivity`] when the device cannot be
    /// reached or rejects authentication.
    async fn send(&self, host: &str, command: &str) -> Result<String>;
}
