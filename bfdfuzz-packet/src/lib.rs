//! Packet construction for the BFD fuzz harness
//!
//! This crate is write-only: it turns field sets into bytes and never parses
//! anything back. It includes:
//!
//! - **BFD Control packets** ([`bfd`]) with no validity enforcement, so
//!   fields can be set to values RFC 5880 forbids
//! - **IPv4** headers with checksum calculation ([`ip`])
//! - **UDP** datagrams with pseudo-header checksum ([`udp`])
//! - A fluent [`DatagramBuilder`] for complete IPv4/UDP packets
//!
//! # Quick Start
//!
//! ```rust
//! use bfdfuzz_packet::{BfdControlFields, BfdState};
//!
//! // A Down packet with a zero detect multiplier and a lying length field
//! let bytes = BfdControlFields::new(0xF0F0_0001)
//!     .with_state(BfdState::Down)
//!     .with_detect_mult(0)
//!     .with_length(48)
//!     .encode();
//!
//! assert_eq!(bytes.len(), 24);
//! assert_eq!(bytes[3], 48);
//! ```

pub mod bfd;
pub mod builder;
pub mod checksum;
pub mod ip;
pub mod udp;

// Re-export commonly used types for convenience
pub use bfd::{
    encode, AuthSection, AuthType, BfdControlFields, BfdDiagnostic, BfdState, BFD_CONTROL_PORT,
    BFD_SOURCE_PORT_MIN, BFD_VERSION, HEADER_SIZE, MIN_PACKET_SIZE_WITH_AUTH,
};
pub use builder::DatagramBuilder;
pub use checksum::{internet_checksum, transport_checksum};
pub use ip::{Ipv4Packet, GTSM_TTL, IPPROTO_UDP};
pub use udp::UdpDatagram;
