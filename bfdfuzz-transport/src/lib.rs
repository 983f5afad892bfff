//! Network side of the BFD fuzz harness
//!
//! Two [`Transport`] backends put fuzz payloads on the wire:
//!
//! - [`UdpTransport`]: kernel UDP socket, TTL set per datagram. Needs no
//!   privileges.
//! - `RawTransport` (Unix only): hand-built IPv4/UDP over a raw socket.
//!
//! The [`LivenessOracle`] runs once after the fuzz run and decides whether
//! the target survived.

pub mod liveness;
#[cfg(unix)]
pub mod raw;
pub mod transport;
pub mod udp;

pub use liveness::{Liveness, LivenessOracle, DEFAULT_PROBE_TIMEOUT};
#[cfg(unix)]
pub use raw::RawTransport;
pub use transport::{connect, Transport, TransportConfig, TransportKind, DEFAULT_TARGET};
pub use udp::UdpTransport;
