//! Mandatory-section field checks (RFC 5880 Section 6.8.6 steps 1, 4-7)

use bfdfuzz_core::{FuzzPacket, ScenarioContext};
use bfdfuzz_packet::{BfdControlFields, BfdState};

/// Version values other than 1
pub const INVALID_VERSIONS: [u8; 7] = [0, 2, 3, 4, 5, 6, 7];

/// P F C A D M, all six flag bits of byte 1
pub const ALL_FLAGS: u8 = 0x3F;

/// Step 1: Version MUST be 1.
pub fn invalid_version(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let my_disc = ctx.next_discriminator();

    INVALID_VERSIONS
        .iter()
        .map(|&version| {
            let bytes = BfdControlFields::new(my_disc)
                .with_version(version)
                .encode();
            FuzzPacket::new(bytes, format!("version={}", version))
        })
        .collect()
}

/// Step 4: Detect Mult MUST NOT be zero.
pub fn zero_detect_mult(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let bytes = BfdControlFields::new(ctx.next_discriminator())
        .with_detect_mult(0)
        .encode();
    vec![FuzzPacket::new(bytes, "detect_mult=0")]
}

/// Step 5: Multipoint MUST be zero.
pub fn multipoint_set(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let mut fields = BfdControlFields::new(ctx.next_discriminator());
    fields.multipoint = true;
    vec![FuzzPacket::new(fields.encode(), "M=1")]
}

/// Step 6: My Discriminator MUST NOT be zero.
pub fn zero_my_discriminator(_ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let bytes = BfdControlFields::new(0).encode();
    vec![FuzzPacket::new(bytes, "my_discr=0")]
}

/// P, F, C, A, D and the forbidden M bit all at once, with no auth section.
pub fn all_flags_set(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let bytes = BfdControlFields::new(ctx.next_discriminator())
        .with_flags(ALL_FLAGS)
        .encode();
    vec![FuzzPacket::new(bytes, "P=F=C=A=D=M=1")]
}

/// Step 7: Your Discriminator zero is only legal in Down or AdminDown.
pub fn your_discr_zero_non_down(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let my_disc = ctx.next_discriminator();

    [BfdState::Init, BfdState::Up]
        .into_iter()
        .map(|state| {
            let bytes = BfdControlFields::new(my_disc)
                .with_state(state)
                .with_your_discriminator(0)
                .encode();
            FuzzPacket::new(bytes, format!("state={},your_discr=0", state.name()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfdfuzz_core::DiscriminatorAllocator;

    #[test]
    fn test_invalid_version_variants() {
        let packets = invalid_version(&mut ScenarioContext::default());
        assert_eq!(packets.len(), 7);

        let versions: Vec<u8> = packets.iter().map(|p| p.bytes[0] >> 5).collect();
        assert_eq!(versions, INVALID_VERSIONS.to_vec());
        assert!(packets.iter().all(|p| p.bytes.len() == 24));
        assert_eq!(packets[0].label, "version=0");
    }

    #[test]
    fn test_zero_detect_mult() {
        let packets = zero_detect_mult(&mut ScenarioContext::default());
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].bytes[2], 0);
        assert_eq!(packets[0].bytes[0] >> 5, 1);
    }

    #[test]
    fn test_multipoint_bit_only() {
        let packets = multipoint_set(&mut ScenarioContext::default());
        assert_eq!(packets[0].bytes[1], 0x41); // Down + M
    }

    #[test]
    fn test_zero_my_discriminator() {
        let mut ctx = ScenarioContext::default();
        let packets = zero_my_discriminator(&mut ctx);
        assert_eq!(&packets[0].bytes[4..8], &[0, 0, 0, 0]);
        // No discriminator consumed
        assert_eq!(ctx.discriminators.peek(), DiscriminatorAllocator::FIRST);
    }

    #[test]
    fn test_all_flags_set() {
        let packets = all_flags_set(&mut ScenarioContext::default());
        assert_eq!(packets[0].bytes[1], 0x7F); // Down + all six flags
        assert_eq!(packets[0].bytes[3], 24);
        assert_eq!(packets[0].bytes.len(), 24);
    }

    #[test]
    fn test_your_discr_zero_non_down() {
        let packets = your_discr_zero_non_down(&mut ScenarioContext::default());
        assert_eq!(packets.len(), 2);
        assert_eq!(packets[0].bytes[1] >> 6, BfdState::Init as u8);
        assert_eq!(packets[1].bytes[1] >> 6, BfdState::Up as u8);
        for pkt in &packets {
            assert_eq!(&pkt.bytes[8..12], &[0, 0, 0, 0]);
        }
        assert_eq!(packets[1].label, "state=Up,your_discr=0");
    }
}
