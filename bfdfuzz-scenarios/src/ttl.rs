//! GTSM enforcement (RFC 5881 Section 5)
//!
//! These packets are valid; only the IP TTL is wrong, so the check being
//! exercised lives in the target's receive path rather than its decoder.

use bfdfuzz_core::{FuzzPacket, ScenarioContext};
use bfdfuzz_packet::BfdControlFields;

/// TTL values below the single-hop 255
pub const WRONG_TTLS: [u8; 4] = [1, 64, 128, 254];

pub fn wrong_ttl(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let payload = BfdControlFields::new(ctx.next_discriminator()).encode();

    WRONG_TTLS
        .iter()
        .map(|&ttl| FuzzPacket::new(payload.clone(), format!("ttl={}", ttl)).with_ttl(ttl))
        .collect()
}
