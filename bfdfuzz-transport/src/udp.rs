//! Kernel UDP socket backend

use crate::transport::{Transport, TransportConfig};
use async_trait::async_trait;
use bfdfuzz_core::{Error, Result};
use bfdfuzz_packet::GTSM_TTL;
use socket2::SockRef;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Largest reply the liveness exchange reads
const RECV_BUFFER_SIZE: usize = 1500;

/// Sends fuzz payloads from one bound UDP socket.
///
/// The socket is never connected, so ICMP errors caused by earlier fuzz
/// datagrams do not surface on later sends.
pub struct UdpTransport {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpTransport {
    /// Bind the source port (0 for ephemeral) on the wildcard address
    /// matching the target's family.
    pub async fn bind(config: &TransportConfig) -> Result<Self> {
        let target = config.target_addr();
        let socket = UdpSocket::bind(unspecified(&target, config.src_port)).await?;

        debug!(
            local = %socket.local_addr()?,
            target = %target,
            "UDP transport bound"
        );

        Ok(Self { socket, target })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn send(&self, payload: &[u8], ttl: u8) -> Result<usize> {
        set_hop_limit(&self.socket, &self.target, ttl)
            .map_err(|e| Error::send(format!("setting TTL {}: {}", ttl, e)))?;

        self.socket
            .send_to(payload, self.target)
            .await
            .map_err(|e| Error::send(e.to_string()))
    }

    async fn exchange(&self, payload: &[u8], timeout: Duration) -> Result<Option<usize>> {
        probe_exchange(self.target, payload, timeout).await
    }

    fn name(&self) -> &str {
        "udp"
    }
}

/// One request/reply exchange on a fresh connected socket.
///
/// Connecting lets the kernel report ICMP port or host unreachable as a
/// socket error (ECONNREFUSED, EHOSTUNREACH) on send or receive.
pub(crate) async fn probe_exchange(
    target: SocketAddr,
    payload: &[u8],
    timeout: Duration,
) -> Result<Option<usize>> {
    let socket = UdpSocket::bind(unspecified(&target, 0))
        .await
        .map_err(|e| Error::probe(format!("binding probe socket: {}", e)))?;
    set_hop_limit(&socket, &target, GTSM_TTL)
        .map_err(|e| Error::probe(format!("setting TTL {}: {}", GTSM_TTL, e)))?;
    socket
        .connect(target)
        .await
        .map_err(|e| Error::probe(format!("connecting to {}: {}", target, e)))?;
    socket
        .send(payload)
        .await
        .map_err(|e| Error::probe(format!("sending to {}: {}", target, e)))?;

    let mut buf = [0u8; RECV_BUFFER_SIZE];
    match tokio::time::timeout(timeout, socket.recv(&mut buf)).await {
        Ok(Ok(n)) => Ok(Some(n)),
        Ok(Err(e)) => Err(Error::probe(format!("waiting for reply: {}", e))),
        Err(_) => Ok(None),
    }
}

fn unspecified(target: &SocketAddr, port: u16) -> SocketAddr {
    match target {
        SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
        SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, port)),
    }
}

fn set_hop_limit(socket: &UdpSocket, target: &SocketAddr, ttl: u8) -> io::Result<()> {
    match target {
        SocketAddr::V4(_) => socket.set_ttl(u32::from(ttl)),
        SocketAddr::V6(_) => SockRef::from(socket).set_unicast_hops_v6(u32::from(ttl)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    async fn listener() -> (UdpSocket, TransportConfig) {
        let listener = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let config = TransportConfig::new(IpAddr::V4(Ipv4Addr::LOCALHOST))
            .with_dst_port(port)
            .with_src_port(0);
        (listener, config)
    }

    #[tokio::test]
    async fn test_send_reaches_target() {
        let (listener, config) = listener().await;
        let transport = UdpTransport::bind(&config).await.unwrap();

        let sent = transport.send(&[0x20, 0x40, 0x03, 0x18], 255).await.unwrap();
        assert_eq!(sent, 4);

        let mut buf = [0u8; 64];
        let (n, from) = listener.recv_from(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], &[0x20, 0x40, 0x03, 0x18]);
        assert_eq!(from.port(), transport.local_addr().unwrap().port());
    }

    #[tokio::test]
    async fn test_zero_length_send() {
        let (listener, config) = listener().await;
        let transport = UdpTransport::bind(&config).await.unwrap();

        assert_eq!(transport.send(&[], 255).await.unwrap(), 0);

        let mut buf = [0u8; 64];
        let (n, _) = listener.recv_from(&mut buf).await.unwrap();
        assert_eq!(n, 0);
    }

    #[tokio::test]
    async fn test_send_with_low_ttl() {
        let (listener, config) = listener().await;
        let transport = UdpTransport::bind(&config).await.unwrap();

        // Loopback delivers even TTL 1
        for ttl in [1, 64, 128, 254] {
            transport.send(&[ttl], ttl).await.unwrap();
        }

        let mut buf = [0u8; 8];
        for ttl in [1u8, 64, 128, 254] {
            let (n, _) = listener.recv_from(&mut buf).await.unwrap();
            assert_eq!(&buf[..n], &[ttl]);
        }
    }

    #[tokio::test]
    async fn test_exchange_times_out_on_silence() {
        let (_listener, config) = listener().await;
        let transport = UdpTransport::bind(&config).await.unwrap();

        let reply = transport
            .exchange(&[0u8; 24], Duration::from_millis(100))
            .await
            .unwrap();
        assert_eq!(reply, None);
    }

    #[tokio::test]
    async fn test_exchange_reports_closed_port() {
        let (listener, config) = listener().await;
        drop(listener);
        let transport = UdpTransport::bind(&config).await.unwrap();

        let err = transport
            .exchange(&[0u8; 24], Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Probe(_)));
    }
}
