//! UDP datagram construction
//!
//! Builds the 8-byte UDP header around an arbitrary payload, including
//! zero-length payloads, and computes the pseudo-header checksum.

use crate::checksum::transport_checksum;
use crate::ip::IPPROTO_UDP;
use bytes::{BufMut, BytesMut};
use std::net::Ipv4Addr;

/// UDP datagram
#[derive(Debug, Clone)]
pub struct UdpDatagram {
    /// Source port
    pub source_port: u16,
    /// Destination port
    pub destination_port: u16,
    /// Payload data
    pub payload: Vec<u8>,
}

impl UdpDatagram {
    /// UDP header size in bytes
    pub const HEADER_SIZE: usize = 8;

    pub fn new(source_port: u16, destination_port: u16, payload: Vec<u8>) -> Self {
        UdpDatagram {
            source_port,
            destination_port,
            payload,
        }
    }

    /// Length field value (header + data, saturating)
    pub fn length(&self) -> u16 {
        u16::try_from(Self::HEADER_SIZE + self.payload.len()).unwrap_or(u16::MAX)
    }

    fn build(&self, checksum: u16) -> Vec<u8> {
        let mut buffer = BytesMut::with_capacity(Self::HEADER_SIZE + self.payload.len());
        buffer.put_u16(self.source_port);
        buffer.put_u16(self.destination_port);
        buffer.put_u16(self.length());
        buffer.put_u16(checksum);
        buffer.put_slice(&self.payload);
        buffer.to_vec()
    }

    /// Serialise with the pseudo-header checksum filled in
    pub fn to_bytes_with_checksum(&self, src_ip: Ipv4Addr, dst_ip: Ipv4Addr) -> Vec<u8> {
        let checksum = transport_checksum(
            &src_ip.octets(),
            &dst_ip.octets(),
            IPPROTO_UDP,
            &self.build(0),
        );

        // A computed checksum of 0 is transmitted as all ones
        self.build(if checksum == 0 { 0xFFFF } else { checksum })
    }
}
