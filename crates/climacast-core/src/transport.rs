//! Datagram transport seam
//!
//! Frames are handed over once, best effort: no acknowledgment, no retry.
//! A failed send is reported to the caller and the next cycle is the retry.

use core::fmt;

use serde::Deserialize;
use thiserror_no_std::Error;

/// Broadcast address and port every frame is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Destination {
    /// IPv4 address octets
    pub address: [u8; 4],
    /// UDP port
    pub port: u16,
}

impl Destination {
    /// Limited broadcast address 255.255.255.255
    pub const BROADCAST: [u8; 4] = [255, 255, 255, 255];

    pub const fn new(address: [u8; 4], port: u16) -> Self {
        Self { address, port }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.address;
        write!(f, "{}.{}.{}.{}:{}", a, b, c, d, self.port)
    }
}

/// Error types for datagram sends
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Network interface is not up, or the socket cannot take the frame yet
    #[error("Transport not ready: {details}")]
    NotReady {
        /// Additional context
        details: &'static str,
    },

    /// The send call failed
    #[error("Send to {destination} failed: {details}")]
    SendFailed {
        /// Where the frame was going
        destination: Destination,
        /// Additional context
        details: &'static str,
    },

    /// Only part of the frame left the socket
    #[error("Datagram truncated: sent {sent} of {expected} bytes")]
    Truncated {
        /// Bytes actually sent
        sent: usize,
        /// Frame size
        expected: usize,
    },
}

/// Unreliable datagram transport
pub trait Transport {
    /// Send `payload` as exactly one datagram to `destination`
    fn send(
        &mut self,
        destination: &Destination,
        payload: &[u8],
    ) -> impl Future<Output = Result<(), TransportError>>;
}
