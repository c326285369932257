//! Connectivity probe
//!
//! A cheap reachability check run before any channel is tried, so an
//! offline host queues immediately instead of waiting on every send timeout.

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Reachability check for the outside world
pub trait ConnectivityProbe {
    /// Whether the network currently looks reachable
    fn is_online(&self) -> bool;
}

/// Probe that opens a TCP connection to a well-known `host:port`
#[derive(Debug, Clone)]
pub struct TcpProbe {
    target: String,
    timeout: Duration,
}

impl TcpProbe {
    /// Create a probe for `target` (`host:port`)
    pub fn new(target: impl Into<String>, timeout: Duration) -> Self {
        Self {
            target: target.into(),
            timeout,
        }
    }
}

impl ConnectivityProbe for TcpProbe {
    fn is_online(&self) -> bool {
        let addrs = match self.target.to_socket_addrs() {
            Ok(addrs) => addrs,
            Err(e) => {
                log::info!("Connectivity probe: cannot resolve {}: {}", self.target, e);
                return false;
            }
        };

        for addr in addrs {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(_) => {
                    log::debug!("Connectivity probe: {} reachable", addr);
                    return true;
                }
                Err(e) => log::debug!("Connectivity probe: {} unreachable: {}", addr, e),
            }
        }

        log::info!("Connectivity probe: {} unreachable, treating host as offline", self.target);
        false
    }
}
