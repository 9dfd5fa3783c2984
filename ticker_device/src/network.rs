//! Network link management.
//!
//! The link is only held for the duration of a fetch. `connect` makes a
//! bounded number of attempts and never retries beyond them; callers release
//! the link with `disconnect` once the round trip is over.

use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

/// Brings the device's network link up and down around a fetch.
pub trait Network {
    /// Bring the link up, or report why it could not be. A failed `connect`
    /// leaves the link released, so `disconnect` is only owed after success.
    fn connect(&mut self) -> io::Result<()>;

    /// Release the link.
    fn disconnect(&mut self);
}

/// Link check for a host machine: the link counts as up once the quote
/// service host accepts a TCP connection.
#[derive(Debug, Clone)]
pub struct HostNetwork {
    /// `host:port` of the quote service.
    probe: String,
    attempts: u32,
    delay: Duration,
    connected: bool,
}

impl HostNetwork {
    /// Probe `probe` (a `host:port` pair) up to `attempts` times, `delay` apart.
    pub fn new(probe: impl Into<String>, attempts: u32, delay: Duration) -> Self {
        Self {
            probe: probe.into(),
            attempts,
            delay,
            connected: false,
        }
    }

    fn try_once(&self) -> io::Result<SocketAddr> {
        let mut last_err = io::Error::new(io::ErrorKind::NotFound, "host resolved to no address");
        for addr in self.probe.to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, self.delay) {
                Ok(_) => return Ok(addr),
                Err(e) => last_err = e,
            }
        }
        Err(last_err)
    }
}

impl Network for HostNetwork {
    fn connect(&mut self) -> io::Result<()> {
        let mut last_err = io::Error::other("no connection attempts configured");
        for attempt in 1..=self.attempts {
            match self.try_once() {
                Ok(addr) => {
                    info!("Network up, {} reachable at {}", self.probe, addr);
                    self.connected = true;
                    return Ok(());
                }
                Err(e) => {
                    debug!("Connection attempt {}/{} failed: {}", attempt, self.attempts, e);
                    last_err = e;
                    if attempt < self.attempts {
                        thread::sleep(self.delay);
                    }
                }
            }
        }
        warn!("Failed to reach {} after {} attempts", self.probe, self.attempts);
        self.connected = false;
        Err(last_err)
    }

    fn disconnect(&mut self) {
        if self.connected {
            debug!("Releasing network link");
        }
        self.connected = false;
    }
}
