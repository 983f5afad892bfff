//! Post-run liveness oracle
//!
//! One valid Down packet with a reserved discriminator is sent after the
//! fuzz run. A reply or plain silence both count as alive: a healthy BFD
//! daemon usually ignores a session it does not know. Only a socket error,
//! typically ICMP port or host unreachable, means the target is gone.

use crate::transport::Transport;
use bfdfuzz_core::PROBE_DISCRIMINATOR;
use bfdfuzz_packet::BfdControlFields;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info};

/// Default wait for a reply
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Oracle result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Liveness {
    /// Reachable; `responded` is true if a reply arrived before the timeout
    Alive { responded: bool },
    /// The probe produced a network-level failure
    Unreachable { reason: String },
}

impl Liveness {
    pub fn is_alive(&self) -> bool {
        matches!(self, Liveness::Alive { .. })
    }
}

impl fmt::Display for Liveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Liveness::Alive { responded: true } => write!(f, "alive (responded)"),
            Liveness::Alive { responded: false } => write!(f, "alive (no response)"),
            Liveness::Unreachable { reason } => write!(f, "unreachable: {}", reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LivenessOracle {
    timeout: Duration,
}

impl LivenessOracle {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The valid Down packet used as the probe
    pub fn probe_packet() -> Vec<u8> {
        BfdControlFields::new(PROBE_DISCRIMINATOR).encode()
    }

    /// Probe the target once.
    pub async fn check(&self, transport: &dyn Transport) -> Liveness {
        debug!(
            transport = transport.name(),
            timeout_ms = self.timeout.as_millis() as u64,
            "sending liveness probe"
        );

        match transport.exchange(&Self::probe_packet(), self.timeout).await {
            Ok(Some(bytes)) => {
                info!(bytes, "liveness probe answered");
                Liveness::Alive { responded: true }
            }
            Ok(None) => {
                info!("no reply to liveness probe, treating target as alive");
                Liveness::Alive { responded: false }
            }
            Err(e) => {
                error!(error = %e, "target unreachable");
                Liveness::Unreachable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl Default for LivenessOracle {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportConfig;
    use crate::udp::UdpTransport;
    use std::net::{IpAddr, Ipv4Addr};
    use tokio::net::UdpSocket;

    fn config(port: u16) -> TransportConfig {
        TransportConfig::new(IpAddr::V4(Ipv4Addr::LOCALHOST))
            .with_dst_port(port)
            .with_src_port(0)
    }

    #[test]
    fn test_probe_packet_is_valid_down() {
        let probe = LivenessOracle::probe_packet();
        assert_eq!(probe.len(), 24);
        assert_eq!(probe[0], 0x20);
        assert_eq!(probe[1] >> 6, 1);
        assert_eq!(&probe[4..8], &[0xDE, 0xAD, 0xDE, 0xAD]);
        assert_eq!(&probe[8..12], &[0, 0, 0, 0]);
    }

    #[tokio::test]
    async fn test_answered_probe() {
        let responder = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = responder.local_addr().unwrap().port();

        tokio::spawn(async move {
            let mut buf = [0u8; 64];
            let (n, from) = responder.recv_from(&mut buf).await.unwrap();
            responder.send_to(&buf[..n], from).await.unwrap();
        });

        let transport = UdpTransport::bind(&config(port)).await.unwrap();
        let liveness = LivenessOracle::new(Duration::from_secs(2))
            .check(&transport)
            .await;
        assert_eq!(liveness, Liveness::Alive { responded: true });
    }

    #[tokio::test]
    async fn test_silent_target_is_alive() {
        let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let port = silent.local_addr().unwrap().port();

        let transport = UdpTransport::bind(&config(port)).await.unwrap();
        let liveness = LivenessOracle::new(Duration::from_millis(100))
            .check(&transport)
            .await;
        assert_eq!(liveness, Liveness::Alive { responded: false });
        drop(silent);
    }

    #[tokio::test]
    async fn test_closed_port_is_unreachable() {
        let port = {
            let tmp = UdpSocket::bind("127.0.0.1:0").await.unwrap();
            tmp.local_addr().unwrap().port()
        };

        let transport = UdpTransport::bind(&config(port)).await.unwrap();
        let liveness = LivenessOracle::new(Duration::from_secs(2))
            .check(&transport)
            .await;
        assert!(!liveness.is_alive(), "got {}", liveness);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Liveness::Alive { responded: false }.to_string(),
            "alive (no response)"
        );
        assert_eq!(
            Liveness::Unreachable {
                reason: "refused".into()
            }
            .to_string(),
            "unreachable: refused"
        );
    }
}
