//! Raw IPv4 backend
//!
//! Builds the IPv4 header and UDP datagram in user space and sends them with
//! IP_HDRINCL, so TTL, ports and checksums on the wire are exactly the ones
//! the packet crate produced. Needs root or CAP_NET_RAW.

use crate::transport::{Transport, TransportConfig};
use crate::udp::probe_exchange;
use async_trait::async_trait;
use bfdfuzz_core::{Error, Result};
use bfdfuzz_packet::{DatagramBuilder, BFD_CONTROL_PORT, BFD_SOURCE_PORT_MIN};
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;
use tracing::debug;

pub struct RawTransport {
    socket: Socket,
    source: Ipv4Addr,
    target: Ipv4Addr,
    src_port: u16,
    dst_port: u16,
    identification: AtomicU16,
}

impl RawTransport {
    pub fn open(config: &TransportConfig) -> Result<Self> {
        let target = match config.target {
            IpAddr::V4(addr) => addr,
            IpAddr::V6(addr) => {
                return Err(Error::UnsupportedTarget(format!(
                    "{} (raw transport is IPv4 only)",
                    addr
                )))
            }
        };

        let socket = Socket::new(Domain::IPV4, Type::RAW, Some(Protocol::UDP)).map_err(|e| {
            if e.kind() == io::ErrorKind::PermissionDenied {
                Error::InsufficientPrivileges(
                    "raw sockets require root or CAP_NET_RAW".to_string(),
                )
            } else {
                Error::Io(e)
            }
        })?;
        socket.set_header_included(true)?;

        let source = source_address_for(target)?;
        // The raw path has no kernel to pick an ephemeral port
        let src_port = match config.src_port {
            0 => BFD_SOURCE_PORT_MIN,
            port => port,
        };

        debug!(
            source = %source,
            target = %target,
            src_port,
            dst_port = config.dst_port,
            "raw transport opened"
        );

        Ok(Self {
            socket,
            source,
            target,
            src_port,
            dst_port: config.dst_port,
            identification: AtomicU16::new(1),
        })
    }

    fn datagram(&self, payload: &[u8], ttl: u8) -> Result<Vec<u8>> {
        DatagramBuilder::new()
            .source(self.source)
            .destination(self.target)
            .source_port(self.src_port)
            .destination_port(self.dst_port)
            .ttl(ttl)
            .identification(self.identification.fetch_add(1, Ordering::Relaxed))
            .payload(payload.to_vec())
            .build()
    }
}

#[async_trait]
impl Transport for RawTransport {
    async fn send(&self, payload: &[u8], ttl: u8) -> Result<usize> {
        let packet = self.datagram(payload, ttl)?;
        let dest = SockAddr::from(SocketAddrV4::new(self.target, 0));

        self.socket
            .send_to(&packet, &dest)
            .map_err(|e| Error::send(e.to_string()))?;

        Ok(payload.len())
    }

    async fn exchange(&self, payload: &[u8], timeout: Duration) -> Result<Option<usize>> {
        let target = SocketAddr::V4(SocketAddrV4::new(self.target, self.dst_port));
        probe_exchange(target, payload, timeout).await
    }

    fn name(&self) -> &str {
        "raw"
    }
}

/// Local address the routing table would use to reach `target`.
fn source_address_for(target: Ipv4Addr) -> Result<Ipv4Addr> {
    let probe = std::net::UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    probe.connect((target, BFD_CONTROL_PORT))?;

    match probe.local_addr()?.ip() {
        IpAddr::V4(addr) => Ok(addr),
        IpAddr::V6(addr) => Err(Error::UnsupportedTarget(format!(
            "no IPv4 route to {} (got {})",
            target, addr
        ))),
    }
}
