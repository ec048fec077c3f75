use std::net::TcpListener;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::{Result, RgpError};
use crate::transport::tcp;

/// Default key folded into the server's challenge answer.
pub const DEFAULT_SERVER_KEY: u16 = 54621;

/// Default key the robots fold into their confirmation.
pub const DEFAULT_CLIENT_KEY: u16 = 45328;

/// Authentication keys and timeout policy for a guidance server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Key added to the username hash in the server's challenge answer.
    pub server_key: u16,
    /// Key a robot adds to the username hash in its confirmation.
    pub client_key: u16,
    /// Read deadline while a robot is responsive.
    pub read_timeout: Duration,
    /// Read deadline while a robot recharges.
    pub recharge_timeout: Duration,
    /// How long the listener waits for a new connection before shutting
    /// down. `None` keeps it alive until [`Server::stop`].
    pub accept_idle_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_key: DEFAULT_SERVER_KEY,
            client_key: DEFAULT_CLIENT_KEY,
            read_timeout: Duration::from_millis(1000),
            recharge_timeout: Duration::from_millis(5000),
            accept_idle_timeout: Some(Duration::from_millis(15000)),
        }
    }
}

/// High-level guidance server orchestrator.
///
/// Binds the listener, runs the accept loop on its own thread, and hands
/// each accepted socket to an independent session thread. Sessions share
/// no state, so there is nothing to coordinate beyond the running flag.
pub struct Server {
    running: Arc<AtomicBool>,
    bind_addr: String,
    config: Arc<ServerConfig>,
    accept_handle: Option<JoinHandle<()>>,
}

impl Server {
    pub fn new(bind_addr: &str) -> Self {
        Self::with_config(bind_addr, ServerConfig::default())
    }

    /// Create a server with custom keys and timeouts.
    pub fn with_config(bind_addr: &str, config: ServerConfig) -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            bind_addr: bind_addr.to_string(),
            config: Arc::new(config),
            accept_handle: None,
        }
    }

    /// Bind the listener and start accepting robots.
    pub fn start(&mut self) -> Result<()> {
        if self.running.load(Ordering::SeqCst) {
            return Err(RgpError::AlreadyRunning);
        }

        let listener = TcpListener::bind(&self.bind_addr)?;
        listener.set_nonblocking(true)?;

        self.running.store(true, Ordering::SeqCst);

        let running = self.running.clone();
        let config = self.config.clone();

        tracing::info!(addr = %self.bind_addr, "guidance server listening");

        self.accept_handle = Some(thread::spawn(move || {
            tcp::accept_loop(listener, config, running);
        }));

        Ok(())
    }

    /// Block until the accept loop exits, either through the accept-idle
    /// timeout or a [`stop`](Self::stop) call.
    pub fn wait(&mut self) -> Result<()> {
        let handle = self.accept_handle.take().ok_or(RgpError::NotStarted)?;
        let _ = handle.join();
        Ok(())
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        tracing::info!("server stopping");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Returns the server's key and timeout configuration.
    pub fn config(&self) -> Arc<ServerConfig> {
        self.config.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_protocol_constants() {
        let config = ServerConfig::default();
        assert_eq!(config.server_key, 54621);
        assert_eq!(config.client_key, 45328);
        assert_eq!(config.read_timeout, Duration::from_millis(1000));
        assert_eq!(config.recharge_timeout, Duration::from_millis(5000));
        assert_eq!(config.accept_idle_timeout, Some(Duration::from_millis(15000)));
    }

    #[test]
    fn wait_before_start_is_an_error() {
        let mut server = Server::new("127.0.0.1:0");
        assert!(matches!(server.wait(), Err(RgpError::NotStarted)));
    }
}
