//! Length field and datagram size checks (RFC 5880 Section 6.8.6 steps 2-3)

use bfdfuzz_core::{FuzzPacket, ScenarioContext};
use bfdfuzz_packet::{BfdControlFields, HEADER_SIZE};

/// Declared lengths below the 24-byte minimum
pub const SHORT_LENGTHS: [u8; 4] = [0, 1, 12, 23];

/// Declared length used against a 24-byte payload
pub const OVERSTATED_LENGTH: u8 = 48;

/// Wire sizes below the mandatory section
pub const TRUNCATED_SIZES: [usize; 6] = [0, 1, 4, 12, 20, 23];

/// Trailing bytes appended past a valid header
pub const OVERSIZE_EXTRA: [usize; 5] = [1, 16, 64, 256, 1024];

/// Step 2: Length below 24 with A clear. The real payload is still 24 bytes.
pub fn length_too_small(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let my_disc = ctx.next_discriminator();

    SHORT_LENGTHS
        .iter()
        .map(|&length| {
            let bytes = BfdControlFields::new(my_disc).with_length(length).encode();
            FuzzPacket::new(bytes, format!("length={}", length))
        })
        .collect()
}

/// Step 3: Length greater than the payload actually received.
pub fn length_exceeds_payload(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let bytes = BfdControlFields::new(ctx.next_discriminator())
        .with_length(OVERSTATED_LENGTH)
        .encode();
    let label = format!("length={}, actual={}", OVERSTATED_LENGTH, bytes.len());
    vec![FuzzPacket::new(bytes, label)]
}

/// Datagrams shorter than the mandatory section, down to zero bytes.
pub fn truncated_packet(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let full = BfdControlFields::new(ctx.next_discriminator()).encode();

    TRUNCATED_SIZES
        .iter()
        .map(|&size| FuzzPacket::new(full[..size].to_vec(), format!("size={}", size)))
        .collect()
}

/// A valid header followed by padding past the target's maximum packet size.
pub fn oversized_packet(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let header = BfdControlFields::new(ctx.next_discriminator()).encode();

    OVERSIZE_EXTRA
        .iter()
        .map(|&extra| {
            let mut bytes = header.clone();
            bytes.resize(HEADER_SIZE + extra, 0);
            FuzzPacket::new(bytes, format!("size={}", HEADER_SIZE + extra))
        })
        .collect()
}
