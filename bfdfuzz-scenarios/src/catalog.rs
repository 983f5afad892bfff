//! The fixed, ordered scenario table

use bfdfuzz_core::{Error, Result, ScenarioDescriptor, ScenarioId};

use crate::{auth, fields, header, length, stress, ttl};

/// Every scenario, in execution order
pub static CATALOG: [ScenarioDescriptor; 18] = [
    ScenarioDescriptor {
        id: ScenarioId(0),
        name: "invalid_version",
        rfc_rule: "RFC 5880 6.8.6 step 1: Version MUST be 1",
        description: "Versions 0 and 2-7",
        generate: header::invalid_version,
    },
    ScenarioDescriptor {
        id: ScenarioId(1),
        name: "zero_detect_mult",
        rfc_rule: "RFC 5880 6.8.6 step 4: Detect Mult MUST NOT be zero",
        description: "Detect Mult 0",
        generate: header::zero_detect_mult,
    },
    ScenarioDescriptor {
        id: ScenarioId(2),
        name: "multipoint_set",
        rfc_rule: "RFC 5880 6.8.6 step 5: Multipoint MUST be zero",
        description: "M bit set",
        generate: header::multipoint_set,
    },
    ScenarioDescriptor {
        id: ScenarioId(3),
        name: "zero_my_discriminator",
        rfc_rule: "RFC 5880 6.8.6 step 6: My Discriminator MUST NOT be zero",
        description: "My Discriminator 0",
        generate: header::zero_my_discriminator,
    },
    ScenarioDescriptor {
        id: ScenarioId(4),
        name: "length_too_small",
        rfc_rule: "RFC 5880 6.8.6 step 2: Length >= 24 when A is clear",
        description: "Declared Length 0, 1, 12, 23 on a 24-byte packet",
        generate: length::length_too_small,
    },
    ScenarioDescriptor {
        id: ScenarioId(5),
        name: "length_exceeds_payload",
        rfc_rule: "RFC 5880 6.8.6 step 3: Length MUST NOT exceed the payload",
        description: "Declared Length 48 on a 24-byte packet",
        generate: length::length_exceeds_payload,
    },
    ScenarioDescriptor {
        id: ScenarioId(6),
        name: "truncated_packet",
        rfc_rule: "RFC 5880 4.1: mandatory section is 24 bytes",
        description: "Datagrams of 0, 1, 4, 12, 20, 23 bytes",
        generate: length::truncated_packet,
    },
    ScenarioDescriptor {
        id: ScenarioId(7),
        name: "auth_flag_no_section",
        rfc_rule: "RFC 5880 6.8.6: A set requires an auth section (Length >= 26)",
        description: "A=1, Length 24, no auth bytes",
        generate: auth::auth_flag_no_section,
    },
    ScenarioDescriptor {
        id: ScenarioId(8),
        name: "auth_section_truncated",
        rfc_rule: "RFC 5880 4.2-4.4: Auth Len must match the section present",
        description: "1-byte auth section; SHA1 header claiming 28 bytes with 3 present",
        generate: auth::auth_section_truncated,
    },
    ScenarioDescriptor {
        id: ScenarioId(9),
        name: "invalid_auth_type",
        rfc_rule: "RFC 5880 4.1: Auth Type 0-5 only",
        description: "Auth Type 6, 7, 128, 255",
        generate: auth::invalid_auth_type,
    },
    ScenarioDescriptor {
        id: ScenarioId(10),
        name: "all_flags_set",
        rfc_rule: "RFC 5880 6.8.6 step 5: Multipoint MUST be zero",
        description: "P, F, C, A, D and M set together",
        generate: header::all_flags_set,
    },
    ScenarioDescriptor {
        id: ScenarioId(11),
        name: "max_field_values",
        rfc_rule: "RFC 5880 4.1: field boundaries",
        description: "Detect Mult 255, all-ones discriminators, all-ones intervals",
        generate: fields::max_field_values,
    },
    ScenarioDescriptor {
        id: ScenarioId(12),
        name: "zero_intervals",
        rfc_rule: "RFC 5880 6.8.1: zero Required Min RX means do not transmit",
        description: "Desired Min TX 0; Required Min RX 0",
        generate: fields::zero_intervals,
    },
    ScenarioDescriptor {
        id: ScenarioId(13),
        name: "your_discr_zero_non_down",
        rfc_rule: "RFC 5880 6.8.6 step 7: Your Discriminator 0 only in Down/AdminDown",
        description: "State Init and Up with Your Discriminator 0",
        generate: header::your_discr_zero_non_down,
    },
    ScenarioDescriptor {
        id: ScenarioId(14),
        name: "random_garbage",
        rfc_rule: "RFC 5880 6.8.6: arbitrary input must be discarded",
        description: "Seeded random payloads of 1 to 1024 bytes",
        generate: stress::random_garbage,
    },
    ScenarioDescriptor {
        id: ScenarioId(15),
        name: "oversized_packet",
        rfc_rule: "Target maximum packet size (64 bytes)",
        description: "Valid header plus 1, 16, 64, 256, 1024 trailing bytes",
        generate: length::oversized_packet,
    },
    ScenarioDescriptor {
        id: ScenarioId(16),
        name: "wrong_ttl",
        rfc_rule: "RFC 5881 5: single-hop packets MUST arrive with TTL 255",
        description: "Valid packet sent with TTL 1, 64, 128, 254",
        generate: ttl::wrong_ttl,
    },
    ScenarioDescriptor {
        id: ScenarioId(17),
        name: "rapid_fire",
        rfc_rule: "Receive path robustness under unpaced load",
        description: "1000 back-to-back packets cycling version and Detect Mult",
        generate: stress::rapid_fire,
    },
];

/// All scenarios in catalog order
pub fn all() -> Vec<&'static ScenarioDescriptor> {
    CATALOG.iter().collect()
}

/// Look up a scenario by name
pub fn find(name: &str) -> Option<&'static ScenarioDescriptor> {
    CATALOG.iter().find(|desc| desc.name == name)
}

/// Scenario names in catalog order
pub fn names() -> Vec<&'static str> {
    CATALOG.iter().map(|desc| desc.name).collect()
}

/// Restrict the catalog to `only` (all when empty) minus `skip`.
///
/// Catalog order is preserved. Unknown names are an error.
pub fn select(only: &[String], skip: &[String]) -> Result<Vec<&'static ScenarioDescriptor>> {
    for name in only.iter().chain(skip) {
        if find(name).is_none() {
            return Err(Error::NotFound(format!(
                "scenario '{}' (known: {})",
                name,
                names().join(", ")
            )));
        }
    }

    Ok(CATALOG
        .iter()
        .filter(|desc| only.is_empty() || only.iter().any(|n| n == desc.name))
        .filter(|desc| !skip.iter().any(|n| n == desc.name))
        .collect())
}
