//! Authentication section checks (RFC 5880 Sections 4.1-4.4, 6.8.6 step 8)

use bfdfuzz_core::{FuzzPacket, ScenarioContext};
use bfdfuzz_packet::bfd::AUTH_LEN_SHA1;
use bfdfuzz_packet::{
    AuthSection, AuthType, BfdControlFields, HEADER_SIZE, MIN_PACKET_SIZE_WITH_AUTH,
};

/// Auth Type values RFC 5880 leaves undefined
pub const UNDEFINED_AUTH_TYPES: [u8; 4] = [6, 7, 128, 255];

/// A set, Length 24, nothing after the header.
pub fn auth_flag_no_section(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let mut fields = BfdControlFields::new(ctx.next_discriminator()).with_length(HEADER_SIZE as u8);
    fields.auth_present = true;
    vec![FuzzPacket::new(fields.encode(), "A=1, length=24, no_auth_data")]
}

/// Auth sections cut short of what their headers promise.
pub fn auth_section_truncated(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    // Only the Auth Type byte, declared Length 26
    let type_only = BfdControlFields::new(ctx.next_discriminator())
        .with_length(MIN_PACKET_SIZE_WITH_AUTH as u8)
        .with_auth(vec![AuthType::SimplePassword.to_u8()])
        .encode();

    // Keyed SHA1 header claiming 28 bytes, only 3 present
    let sha1_header = AuthSection::new(AuthType::KeyedSha1, AUTH_LEN_SHA1, 1);
    let sha1 = BfdControlFields::new(ctx.next_discriminator())
        .with_length(27)
        .with_auth(sha1_header.to_bytes())
        .encode();

    vec![
        FuzzPacket::new(type_only, "auth_data=1_byte"),
        FuzzPacket::new(sha1, "sha1_auth_truncated"),
    ]
}

/// Minimal Type/Len/KeyID sections with undefined Auth Types.
pub fn invalid_auth_type(ctx: &mut ScenarioContext) -> Vec<FuzzPacket> {
    let my_disc = ctx.next_discriminator();

    UNDEFINED_AUTH_TYPES
        .iter()
        .map(|&auth_type| {
            let section = AuthSection::new(AuthType::from_u8(auth_type), 3, 1);
            let bytes = BfdControlFields::new(my_disc)
                .with_length(27)
                .with_auth(section.to_bytes())
                .encode();
            FuzzPacket::new(bytes, format!("auth_type={}", auth_type))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const A_BIT: u8 = 0x04;

    #[test]
    fn test_auth_flag_without_section() {
        let packets = auth_flag_no_section(&mut ScenarioContext::default());
        let bytes = &packets[0].bytes;
        assert_eq!(bytes.len(), 24);
        assert_eq!(bytes[1] & A_BIT, A_BIT);
        assert_eq!(bytes[3], 24);
    }

    #[test]
    fn test_truncated_auth_sections() {
        let packets = auth_section_truncated(&mut ScenarioContext::default());
        assert_eq!(packets.len(), 2);

        assert_eq!(packets[0].bytes.len(), 25);
        assert_eq!(packets[0].bytes[3], 26);
        assert_eq!(packets[0].bytes[24], 0x01);

        assert_eq!(packets[1].bytes.len(), 27);
        assert_eq!(packets[1].bytes[3], 27);
        assert_eq!(&packets[1].bytes[24..], &[0x04, 0x1C, 0x01]);

        assert!(packets.iter().all(|p| p.bytes[1] & A_BIT == A_BIT));
        // Separate sessions
        assert_ne!(packets[0].bytes[4..8], packets[1].bytes[4..8]);
    }

    #[test]
    fn test_invalid_auth_types() {
        let packets = invalid_auth_type(&mut ScenarioContext::default());
        let types: Vec<u8> = packets.iter().map(|p| p.bytes[24]).collect();
        assert_eq!(types, UNDEFINED_AUTH_TYPES.to_vec());
        for pkt in &packets {
            assert_eq!(pkt.bytes.len(), 27);
            assert_eq!(&pkt.bytes[25..], &[3, 1]);
        }
        assert_eq!(packets[3].label, "auth_type=255");
    }
}
