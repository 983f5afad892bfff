//! Transport abstraction and backend selection

use async_trait::async_trait;
use bfdfuzz_core::{Error, Result};
use bfdfuzz_packet::{BFD_CONTROL_PORT, BFD_SOURCE_PORT_MIN};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

/// Default target address
pub const DEFAULT_TARGET: IpAddr = IpAddr::V4(Ipv4Addr::new(172, 20, 0, 10));

/// Sends fuzz payloads to one target and performs the liveness exchange.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `payload` as the body of one UDP datagram with the given IP TTL.
    ///
    /// Returns the number of payload bytes handed to the network.
    async fn send(&self, payload: &[u8], ttl: u8) -> Result<usize>;

    /// Send `payload` at TTL 255 and wait up to `timeout` for any reply.
    ///
    /// `Ok(None)` means the wait timed out with no socket error.
    async fn exchange(&self, payload: &[u8], timeout: Duration) -> Result<Option<usize>>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Where fuzz datagrams go and where they claim to come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    pub target: IpAddr,
    pub dst_port: u16,
    /// 0 picks an ephemeral port on the UDP backend
    pub src_port: u16,
}

impl TransportConfig {
    pub fn new(target: IpAddr) -> Self {
        Self {
            target,
            dst_port: BFD_CONTROL_PORT,
            src_port: BFD_SOURCE_PORT_MIN,
        }
    }

    pub fn with_dst_port(mut self, port: u16) -> Self {
        self.dst_port = port;
        self
    }

    pub fn with_src_port(mut self, port: u16) -> Self {
        self.src_port = port;
        self
    }

    pub fn target_addr(&self) -> SocketAddr {
        SocketAddr::new(self.target, self.dst_port)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET)
    }
}

/// Available transport backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportKind {
    /// Kernel UDP socket, TTL set per send
    #[default]
    Udp,
    /// Hand-built IPv4/UDP over a raw socket
    Raw,
}

impl TransportKind {
    pub fn name(&self) -> &'static str {
        match self {
            TransportKind::Udp => "udp",
            TransportKind::Raw => "raw",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransportKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "udp" => Ok(TransportKind::Udp),
            "raw" => Ok(TransportKind::Raw),
            other => Err(Error::invalid_parameter(
                "transport".to_string(),
                format!("unknown backend '{}' (expected udp or raw)", other),
            )),
        }
    }
}

/// Open the selected backend for `config`.
pub async fn connect(kind: TransportKind, config: &TransportConfig) -> Result<Box<dyn Transport>> {
    match kind {
        TransportKind::Udp => Ok(Box::new(crate::udp::UdpTransport::bind(config).await?)),
        #[cfg(unix)]
        TransportKind::Raw => Ok(Box::new(crate::raw::RawTransport::open(config)?)),
        #[cfg(not(unix))]
        TransportKind::Raw => Err(Error::UnsupportedTarget(
            "raw transport is only available on Unix".to_string(),
        )),
    }
}
