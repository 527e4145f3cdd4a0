//! UDP broadcast transport over the host network stack

use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};

use climacast_core::transport::{Destination, Transport, TransportError};
use log::{info, warn};

/// Sends every frame as one UDP datagram from a broadcast-enabled socket
pub struct UdpBroadcastTransport {
    socket: UdpSocket,
}

impl UdpBroadcastTransport {
    /// Bind on `local` and enable broadcast
    pub fn bind(local: SocketAddr) -> io::Result<Self> {
        let socket = UdpSocket::bind(local)?;
        socket.set_broadcast(true)?;
        info!("UDP transport bound to {}", socket.local_addr()?);
        Ok(Self { socket })
    }

    /// Bind on an ephemeral port on all interfaces
    pub fn bind_any() -> io::Result<Self> {
        Self::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)))
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

/// Map a failed `send_to` onto the transport error it represents.
///
/// A link that is down or a full socket buffer is transient and reported as
/// not ready; everything else is a failed send.
fn classify(error: &io::Error, destination: &Destination) -> TransportError {
    let not_ready = |details| TransportError::NotReady { details };
    let failed = |details| TransportError::SendFailed {
        destination: *destination,
        details,
    };

    match error.kind() {
        io::ErrorKind::WouldBlock => not_ready("socket would block"),
        io::ErrorKind::NetworkDown => not_ready("network down"),
        io::ErrorKind::NetworkUnreachable => not_ready("network unreachable"),
        io::ErrorKind::PermissionDenied => failed("broadcast not permitted"),
        io::ErrorKind::AddrNotAvailable => failed("address not available"),
        _ => failed("socket error"),
    }
}

impl Transport for UdpBroadcastTransport {
    async fn send(&mut self, destination: &Destination, payload: &[u8]) -> Result<(), TransportError> {
        let target = SocketAddrV4::new(Ipv4Addr::from(destination.address), destination.port);

        match self.socket.send_to(payload, target) {
            Ok(sent) if sent == payload.len() => Ok(()),
            Ok(sent) => Err(TransportError::Truncated {
                sent,
                expected: payload.len(),
            }),
            Err(e) => {
                warn!("send_to {} failed: {}", target, e);
                Err(classify(&e, destination))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use std::time::Duration;

    #[test]
    fn test_loopback_delivers_one_datagram() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        receiver
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let port = receiver.local_addr().unwrap().port();

        let mut transport =
            UdpBroadcastTransport::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0))).unwrap();
        let destination = Destination::new([127, 0, 0, 1], port);
        let payload = b"{TIMEPLOT|DATA|Filtered Temperature|T|25.5}\n";

        block_on(transport.send(&destination, payload)).unwrap();

        let mut buffer = [0u8; 256];
        let (len, from) = receiver.recv_from(&mut buffer).unwrap();
        assert_eq!(&buffer[..len], payload);
        assert_eq!(from, transport.local_addr().unwrap());
    }

    #[test]
    fn test_classify_maps_error_kinds() {
        let destination = Destination::new([255, 255, 255, 255], 52791);

        let busy = io::Error::from(io::ErrorKind::WouldBlock);
        assert_eq!(
            classify(&busy, &destination),
            TransportError::NotReady {
                details: "socket would block"
            }
        );

        let down = io::Error::from(io::ErrorKind::NetworkDown);
        assert!(matches!(
            classify(&down, &destination),
            TransportError::NotReady { .. }
        ));

        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(
            classify(&denied, &destination),
            TransportError::SendFailed {
                destination,
                details: "broadcast not permitted"
            }
        );

        let other = io::Error::other("boom");
        assert_eq!(
            classify(&other, &destination),
            TransportError::SendFailed {
                destination,
                details: "socket error"
            }
        );
    }
}
