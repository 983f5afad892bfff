//! Unstructured input and receive-path load

use bfdfuzz_core::{FuzzPacket, ScenarioContext};
use bfdfuzz_packet::BfdControlFields;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Sizes of the random payloads
pub const GARBAGE_SIZES: [usize; 10] = [1, 8, 24, 32, 48, 64, 128, 256, 512, 1024];

/// Packets in the mixed-validity burst
pub const BURST_COUNT: u32 = 1000;

/// Uniformly random payloads from a seeded generator.
///
/// ChaCha8 output is stable across platforms and crate releases, so a given
/// seed always reproduces the same bytes.
pub fn random_garbage(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let mut rng = ChaCha8Rng::seed_from_u64(ctx.seed);

    GARBAGE_SIZES
        .iter()
        .map(|&size| {
            let mut payload = vec![0u8; size];
            rng.fill_bytes(&mut payload);
            FuzzPacket::new(payload, format!("random_{}bytes", size))
        })
        .collect()
}

/// Back-to-back packets cycling version through 0-7 and detect mult through
/// 0-255, each on its own discriminator.
pub fn rapid_fire(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let base = ctx.discriminators.reserve(BURST_COUNT);

    (0..BURST_COUNT)
        .map(|i| {
            let version = (i % 8) as u8;
            let detect_mult = (i % 256) as u8;
            let bytes = BfdControlFields::new(base.wrapping_add(i))
                .with_version(version)
                .with_detect_mult(detect_mult)
                .encode();
            FuzzPacket::new(
                bytes,
                format!("burst[{}] version={} detect_mult={}", i, version, detect_mult),
            )
        })
        .collect()
}
