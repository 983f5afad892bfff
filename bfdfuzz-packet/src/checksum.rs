//! Internet checksum (RFC 1071) for the hand-built IPv4 and UDP headers

/// Calculates the Internet Checksum as defined in RFC 1071.
///
/// # Arguments
///
/// * `data` - Bytes to sum as big-endian 16-bit words; an odd trailing byte
///   is padded with zero
///
/// # Returns
///
/// The one's complement of the folded sum. Data that already carries a
/// correct checksum yields 0.
///
/// # Examples
///
/// ```
/// use bfdfuzz_packet::checksum::internet_checksum;
///
/// let checksum = internet_checksum(&[0x45, 0x00, 0x00, 0x3c]);
/// assert_eq!(checksum, !(0x4500u16 + 0x003c));
/// ```
pub fn internet_checksum(data: &[u8]) -> u16 {
    let sum: u32 = data
        .chunks(2)
        .map(|word| match *word {
            [hi, lo] => u32::from(u16::from_be_bytes([hi, lo])),
            [hi] => u32::from(hi) << 8,
            _ => 0,
        })
        .sum();

    !fold_carries(sum)
}

/// End-around carry until the sum fits in 16 bits
fn fold_carries(mut sum: u32) -> u16 {
    while sum > 0xFFFF {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    sum as u16
}

/// Checksum over the IPv4 pseudo-header followed by a UDP/TCP segment.
///
/// # Arguments
///
/// * `src_ip` - Source IPv4 address octets
/// * `dst_ip` - Destination IPv4 address octets
/// * `protocol` - IP protocol number (17 for UDP)
/// * `segment` - Transport header and payload
pub fn transport_checksum(src_ip: &[u8; 4], dst_ip: &[u8; 4], protocol: u8, segment: &[u8]) -> u16 {
    let mut pseudo_header = Vec::with_capacity(12 + segment.len());

    pseudo_header.extend_from_slice(src_ip);
    pseudo_header.extend_from_slice(dst_ip);
    pseudo_header.push(0);
    pseudo_header.push(protocol);
    pseudo_header.extend_from_slice(&(segment.len() as u16).to_be_bytes());
    pseudo_header.extend_from_slice(segment);

    internet_checksum(&pseudo_header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internet_checksum_empty() {
        assert_eq!(internet_checksum(&[]), 0xFFFF);
    }

    #[test]
    fn test_rfc1071_example() {
        // RFC 1071 Section 3: sum of these words is 0xDDF2 after folding
        let data = [0x00, 0x01, 0xf2, 0x03, 0xf4, 0xf5, 0xf6, 0xf7];
        assert_eq!(internet_checksum(&data), !0xDDF2u16);
    }

    #[test]
    fn test_carries_fold_back() {
        // 0xFFFF + 0x0001 = 0x10000 -> 0x0001 after the end-around carry
        assert_eq!(internet_checksum(&[0xFF, 0xFF, 0x00, 0x01]), !0x0001u16);
    }

    #[test]
    fn test_odd_length_pads_with_zero() {
        assert_eq!(internet_checksum(&[0x12]), internet_checksum(&[0x12, 0x00]));
    }

    #[test]
    fn test_checksum_complement_identity() {
        let data = vec![0x12, 0x34, 0x56, 0x78];
        let checksum = internet_checksum(&data);

        let mut with_checksum = data;
        with_checksum.extend_from_slice(&checksum.to_be_bytes());

        assert_eq!(internet_checksum(&with_checksum), 0);
    }

    #[test]
    fn test_transport_checksum_validates() {
        let src = [10, 0, 0, 1];
        let dst = [10, 0, 0, 2];
        let mut segment = vec![0xC0, 0x00, 0x0E, 0xC8, 0x00, 0x0A, 0x00, 0x00, 0xAB, 0xCD];

        let checksum = transport_checksum(&src, &dst, 17, &segment);
        segment[6..8].copy_from_slice(&checksum.to_be_bytes());

        assert_eq!(transport_checksum(&src, &dst, 17, &segment), 0);
    }
}
