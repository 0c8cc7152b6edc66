//! UDP transport implementation

use std::io;
use std::net::SocketAddr;

use tokio::net::UdpSocket;

use avosc_core::{AvoscError, AvoscResult};
use avosc_wire::Message;

/// UDP socket carrying OSC datagrams
#[derive(Debug)]
pub struct OscSocket {
    socket: UdpSocket,
    local_addr: SocketAddr,
}

impl OscSocket {
    /// Bind to a local address
    pub async fn bind(addr: SocketAddr) -> AvoscResult<Self> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| AvoscError::Bind { addr, source })?;

        let local_addr = socket
            .local_addr()
            .map_err(|source| AvoscError::Bind { addr, source })?;

        tracing::debug!(%local_addr, "UDP socket bound");

        Ok(OscSocket {
            socket,
            local_addr,
        })
    }

    /// Get local address
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Receive one datagram into `buf`
    ///
    /// Datagrams longer than `buf` are truncated by the OS.
    pub async fn recv_datagram(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        self.socket.recv_from(buf).await
    }

    /// Encode and send a message to a destination
    pub async fn send_message(&self, message: &Message, dest: SocketAddr) -> AvoscResult<()> {
        let bytes = message.encode()?;
        self.send_bytes_to(&bytes, dest).await
    }

    /// Send raw bytes to a destination
    pub async fn send_bytes_to(&self, bytes: &[u8], dest: SocketAddr) -> AvoscResult<()> {
        self.socket
            .send_to(bytes, dest)
            .await
            .map_err(|e| AvoscError::TransportError(e.to_string()))?;
        Ok(())
    }
}
