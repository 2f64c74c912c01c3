use crate::error::SyncError;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

/// A connectionless, non-blocking datagram path to one peer.
#[derive(Debug)]
pub struct UdpLink {
    channel: &'static str,
    socket: UdpSocket,
    peer: SocketAddr,
}

impl UdpLink {
    /// Resolves `address` (`host:port`) once and binds an ephemeral local port.
    pub fn open(channel: &'static str, address: &str) -> Result<Self, SyncError> {
        let peer = address
            .to_socket_addrs()
            .map_err(|source| SyncError::Resolve {
                channel,
                address: address.to_string(),
                source,
            })?
            .next()
            .ok_or_else(|| SyncError::NoAddress {
                channel,
                address: address.to_string(),
            })?;

        let local = if peer.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let io = |source: std::io::Error| SyncError::Io { channel, source };
        let socket = UdpSocket::bind(local).map_err(io)?;
        socket.set_nonblocking(true).map_err(io)?;

        Ok(Self {
            channel,
            socket,
            peer,
        })
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn send(&self, payload: &[u8]) -> Result<(), SyncError> {
        let sent = self
            .socket
            .send_to(payload, self.peer)
            .map_err(|source| SyncError::Io {
                channel: self.channel,
                source,
            })?;
        if sent != payload.len() {
            return Err(SyncError::Truncated {
                channel: self.channel,
                sent,
                len: payload.len(),
            });
        }
        Ok(())
    }
}
