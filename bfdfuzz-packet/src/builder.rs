//! Fluent builder for complete IPv4/UDP datagrams
//!
//! Used by the raw-socket transport, which hands the kernel a full IP
//! packet so the TTL and ports are exactly what the scenario asked for.

use crate::bfd::{BFD_CONTROL_PORT, BFD_SOURCE_PORT_MIN};
use crate::ip::{Ipv4Packet, GTSM_TTL, IPPROTO_UDP};
use crate::udp::UdpDatagram;
use bfdfuzz_core::{Error, Result};
use std::net::Ipv4Addr;

/// IPv4/UDP datagram builder
///
/// # Examples
///
/// ```
/// use std::net::Ipv4Addr;
/// use bfdfuzz_packet::DatagramBuilder;
///
/// let datagram = DatagramBuilder::new()
///     .source(Ipv4Addr::new(172, 20, 0, 2))
///     .destination(Ipv4Addr::new(172, 20, 0, 10))
///     .ttl(254)
///     .payload(vec![0x20, 0x40, 0x03, 0x18])
///     .build()
///     .unwrap();
///
/// assert_eq!(datagram[8], 254);
/// assert_eq!(datagram.len(), 20 + 8 + 4);
/// ```
#[derive(Debug, Clone)]
pub struct DatagramBuilder {
    source: Option<Ipv4Addr>,
    destination: Option<Ipv4Addr>,
    source_port: u16,
    destination_port: u16,
    ttl: u8,
    identification: u16,
    payload: Vec<u8>,
}

impl DatagramBuilder {
    /// New builder with BFD single-hop defaults (ports 49152 -> 3784, TTL 255)
    pub fn new() -> Self {
        DatagramBuilder {
            source: None,
            destination: None,
            source_port: BFD_SOURCE_PORT_MIN,
            destination_port: BFD_CONTROL_PORT,
            ttl: GTSM_TTL,
            identification: 0,
            payload: Vec::new(),
        }
    }

    pub fn source(mut self, ip: Ipv4Addr) -> Self {
        self.source = Some(ip);
        self
    }

    pub fn destination(mut self, ip: Ipv4Addr) -> Self {
        self.destination = Some(ip);
        self
    }

    pub fn source_port(mut self, port: u16) -> Self {
        self.source_port = port;
        self
    }

    pub fn destination_port(mut self, port: u16) -> Self {
        self.destination_port = port;
        self
    }

    pub fn ttl(mut self, ttl: u8) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn identification(mut self, id: u16) -> Self {
        self.identification = id;
        self
    }

    pub fn payload(mut self, data: Vec<u8>) -> Self {
        self.payload = data;
        self
    }

    /// Build the full IPv4 packet bytes
    ///
    /// Fails only if an address is missing.
    pub fn build(self) -> Result<Vec<u8>> {
        let source = self
            .source
            .ok_or_else(|| Error::invalid_parameter("source", "source address not set"))?;
        let destination = self
            .destination
            .ok_or_else(|| Error::invalid_parameter("destination", "destination address not set"))?;

        let udp = UdpDatagram::new(self.source_port, self.destination_port, self.payload)
            .to_bytes_with_checksum(source, destination);

        let packet = Ipv4Packet::new(source, destination, IPPROTO_UDP, udp)
            .with_ttl(self.ttl)
            .with_identification(self.identification);

        Ok(packet.to_bytes())
    }
}

impl Default for DatagramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addrs() -> (Ipv4Addr, Ipv4Addr) {
        (Ipv4Addr::new(172, 20, 0, 2), Ipv4Addr::new(172, 20, 0, 10))
    }

    #[test]
    fn test_defaults_are_single_hop_bfd() {
        let (src, dst) = addrs();
        let bytes = DatagramBuilder::new()
            .source(src)
            .destination(dst)
            .payload(vec![0; 24])
            .build()
            .unwrap();

        assert_eq!(bytes[8], 255);
        assert_eq!(bytes[9], IPPROTO_UDP);
        assert_eq!(u16::from_be_bytes([bytes[20], bytes[21]]), 49152);
        assert_eq!(u16::from_be_bytes([bytes[22], bytes[23]]), 3784);
        assert_eq!(u16::from_be_bytes([bytes[24], bytes[25]]), 32);
        assert_eq!(bytes.len(), 20 + 8 + 24);
    }

    #[test]
    fn test_zero_length_payload() {
        let (src, dst) = addrs();
        let bytes = DatagramBuilder::new()
            .source(src)
            .destination(dst)
            .build()
            .unwrap();
        assert_eq!(bytes.len(), 28);
        assert_eq!(u16::from_be_bytes([bytes[2], bytes[3]]), 28);
    }

    #[test]
    fn test_port_override() {
        let (src, dst) = addrs();
        let bytes = DatagramBuilder::new()
            .source(src)
            .destination(dst)
            .source_port(50000)
            .destination_port(4784)
            .build()
            .unwrap();
        assert_eq!(u16::from_be_bytes([bytes[20], bytes[21]]), 50000);
        assert_eq!(u16::from_be_bytes([bytes[22], bytes[23]]), 4784);
    }

    #[test]
    fn test_missing_address() {
        let result = DatagramBuilder::new()
            .destination(Ipv4Addr::LOCALHOST)
            .build();
        assert!(matches!(result, Err(Error::InvalidParameter { .. })));
    }
}
