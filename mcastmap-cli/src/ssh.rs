//! SSH device session
//!
//! Production [`DeviceSession`] implementation: one short-lived SSH exec
//! channel per command. The ssh2 API is blocking, so each exchange runs on
//! the blocking thread pool; the engine's fan-out limit bounds how many of
//! these are in flight at once.

use async_trait::async_trait;
use mcastmap_core::{DeviceSession, Error, Result};
use ssh2::Session;
use std::io::Read;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing::debug;

/// SSH connection settings shared by every device in the fleet
#[derive(Debug, Clone)]
pub struct SshSession {
    username: String,
    password: String,
    port: u16,
    connect_timeout: Duration,
}

impl SshSession {
    pub fn new<U: Into<String>, P: Into<String>>(username: U, password: P) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            port: 22,
            connect_timeout: Duration::from_secs(30),
        }
    }

    /// Set the SSH port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the TCP connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    fn exec_blocking(&self, host: &str, command: &str) -> Result<String> {
        let address = (host, self.port)
            .to_socket_addrs()
            .map_err(|e| Error::connectivity(host, format!("address lookup failed: {e}")))?
            .next()
            .ok_or_else(|| Error::connectivity(host, "hostname resolved to no addresses"))?;

        let stream = TcpStream::connect_timeout(&address, self.connect_timeout)
            .map_err(|e| Error::connectivity(host, e.to_string()))?;

        let mut session = Session::new().map_err(|e| Error::session(e.to_string()))?;
        session.set_tcp_stream(stream);
        session
            .handshake()
            .map_err(|e| Error::connectivity(host, format!("handshake failed: {e}")))?;
        session
            .userauth_password(&self.username, &self.password)
            .map_err(|e| Error::connectivity(host, format!("authentication failed: {e}")))?;

        let mut channel = session
            .channel_session()
            .map_err(|e| Error::session(e.to_string()))?;
        channel
            .exec(command)
            .map_err(|e| Error::session(format!("exec on '{host}' failed: {e}")))?;

        let mut output = String::new();
        channel.read_to_string(&mut output)?;
        // Best effort; the output is already in hand
        let _ = channel.wait_close();

        debug!(host = %host, command = %command, bytes = output.len(), "command executed");
        Ok(output)
    }
}

#[async_trait]
impl DeviceSession for SshSession {
    async fn send(&self, host: &str, command: &str) -> Result<String> {
        let session = self.clone();
        let host = host.to_string();
        let command = command.to_string();
        tokio::task::spawn_blocking(move || session.exec_blocking(&host, &command))
            .await
            .map_err(|e| Error::session(format!("ssh worker failed: {e}")))?
    }
}
