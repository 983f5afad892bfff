//! Boundary values for fields RFC 5880 does not range-check

use bfdfuzz_core::{FuzzPacket, ScenarioContext};
use bfdfuzz_packet::BfdControlFields;

/// Maximum detect multiplier, all-ones discriminators, all-ones intervals.
pub fn max_field_values(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let detect_mult = BfdControlFields::new(ctx.next_discriminator())
        .with_detect_mult(u8::MAX)
        .encode();

    let discriminators = BfdControlFields::new(u32::MAX)
        .with_your_discriminator(u32::MAX)
        .encode();

    let intervals = BfdControlFields::new(ctx.next_discriminator())
        .with_intervals(u32::MAX, u32::MAX)
        .with_echo_interval(u32::MAX)
        .encode();

    vec![
        FuzzPacket::new(detect_mult, "detect_mult=255"),
        FuzzPacket::new(discriminators, "max_discriminators"),
        FuzzPacket::new(intervals, "max_intervals"),
    ]
}

/// Zero Desired Min TX, then zero Required Min RX ("do not send to me").
pub fn zero_intervals(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let mut tx = BfdControlFields::new(ctx.next_discriminator());
    tx.desired_min_tx_interval = 0;

    let mut rx = BfdControlFields::new(ctx.next_discriminator());
    rx.required_min_rx_interval = 0;

    vec![
        FuzzPacket::new(tx.encode(), "desired_min_tx=0"),
        FuzzPacket::new(rx.encode(), "required_min_rx=0"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_field_values() {
        let packets = max_field_values(&mut ScenarioContext::default());
        assert_eq!(packets.len(), 3);

        assert_eq!(packets[0].bytes[2], 0xFF);
        assert_eq!(&packets[1].bytes[4..12], &[0xFF; 8]);
        assert_eq!(&packets[2].bytes[12..24], &[0xFF; 12]);
        // Max intervals keep a usable discriminator
        assert_ne!(&packets[2].bytes[4..8], &[0xFF; 4]);
    }

    #[test]
    fn test_zero_intervals_one_at_a_time() {
        let packets = zero_intervals(&mut ScenarioContext::default());

        assert_eq!(&packets[0].bytes[12..16], &[0, 0, 0, 0]);
        assert_eq!(&packets[0].bytes[16..20], &1_000_000u32.to_be_bytes());

        assert_eq!(&packets[1].bytes[12..16], &1_000_000u32.to_be_bytes());
        assert_eq!(&packets[1].bytes[16..20], &[0, 0, 0, 0]);
    }
}
