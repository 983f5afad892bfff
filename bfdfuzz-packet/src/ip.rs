//! IPv4 header construction for the raw-socket transport
//!
//! Only the fields a BFD sender controls are exposed. Options are not
//! supported: the header is always 20 bytes.

use crate::checksum::internet_checksum;
use bytes::{BufMut, BytesMut};
use std::net::Ipv4Addr;

/// IP protocol number of UDP
pub const IPPROTO_UDP: u8 = 17;

/// Single-hop TTL required by GTSM (RFC 5881 Section 5)
pub const GTSM_TTL: u8 = 255;

/// IPv4 packet (header plus payload)
#[derive(Debug, Clone)]
pub struct Ipv4Packet {
    /// Identification
    pub identification: u16,
    /// Don't Fragment flag
    pub dont_fragment: bool,
    /// Time to Live
    pub ttl: u8,
    /// Protocol number
    pub protocol: u8,
    /// Source IP address
    pub source: Ipv4Addr,
    /// Destination IP address
    pub destination: Ipv4Addr,
    /// Payload data
    pub payload: Vec<u8>,
}

impl Ipv4Packet {
    /// IPv4 header size without options
    pub const HEADER_SIZE: usize = 20;

    /// Create a packet with TTL 255 and DF set
    pub fn new(source: Ipv4Addr, destination: Ipv4Addr, protocol: u8, payload: Vec<u8>) -> Self {
        Ipv4Packet {
            identification: 0,
            dont_fragment: true,
            ttl: GTSM_TTL,
            protocol,
            source,
            destination,
            payload,
        }
    }

    /// Set the Time to Live
    pub fn with_ttl(mut self, ttl: u8) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the identification field
    pub fn with_identification(mut self, id: u16) -> Self {
        self.identification = id;
        self
    }

    /// Total length field value (saturates for oversized payloads)
    pub fn total_length(&self) -> u16 {
        u16::try_from(Self::HEADER_SIZE + self.payload.len()).unwrap_or(u16::MAX)
    }

    fn header_bytes(&self, checksum: u16) -> BytesMut {
        let mut buffer = BytesMut::with_capacity(Self::HEADER_SIZE);

        // Version 4, IHL 5
        buffer.put_u8(0x45);
        // Type of Service
        buffer.put_u8(0);
        buffer.put_u16(self.total_length());
        buffer.put_u16(self.identification);

        // Flags (3 bits) + Fragment Offset (13 bits)
        buffer.put_u16(if self.dont_fragment { 0x4000 } else { 0 });

        buffer.put_u8(self.ttl);
        buffer.put_u8(self.protocol);
        buffer.put_u16(checksum);
        buffer.put_slice(&self.source.octets());
        buffer.put_slice(&self.destination.octets());

        buffer
    }

    /// Header checksum over the 20-byte header
    pub fn checksum(&self) -> u16 {
        internet_checksum(&self.header_bytes(0))
    }

    /// Serialise header (with checksum) and payload
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = self.header_bytes(self.checksum());
        buffer.put_slice(&self.payload);
        buffer.to_vec()
    }
}
