//! Conversions between prefix lengths and network masks, plus the prefix comparison every containment check is built on. A network
//! mask is a run of one bits in the most significant positions followed only by zero bits (`255.255.252.0` is `/22`). A host mask is
//! the complement of that shape (`0.0.3.255`).
//!
//! ## References
//! - [Classless Inter-domain Routing (CIDR), RFC 4632](https://datatracker.ietf.org/doc/html/rfc4632#section-3.1)

use crate::bytes::ByteVector;
use ipkit_common::{
    AddrError,
    Family,
};

/// Builds the network mask with `prefix` leading one bits for the specified family.
///
/// # Errors
/// [`AddrError::InvalidNetmaskLength`] if `prefix` is greater than the bit length of the family.
pub fn from_prefix_length(prefix: u8, family: Family) -> Result<ByteVector, AddrError> {
    if prefix > family.bit_len() {
        return Err(AddrError::InvalidNetmaskLength);
    }

    let host_bits = u32::from(family.bit_len() - prefix);
    Ok(match family {
        Family::IPv4 => ByteVector::V4(u32::MAX.checked_shl(host_bits).unwrap_or(0).to_be_bytes()),
        Family::IPv6 => ByteVector::V6(u128::MAX.checked_shl(host_bits).unwrap_or(0).to_be_bytes()),
    })
}

/// Returns the prefix length of `mask` if it is a valid network mask.
pub(crate) fn prefix_of(mask: &ByteVector) -> Option<u8> {
    let (value, bit_len) = match mask {
        ByteVector::V4(bytes) => (u128::from(u32::from_be_bytes(*bytes)) << 96, 32),
        ByteVector::V6(bytes) => (u128::from_be_bytes(*bytes), 128),
    };

    let prefix = value.leading_ones().min(bit_len);
    match value.checked_shl(prefix).unwrap_or(0) {
        0 => Some(prefix as u8),
        _ => None,
    }
}

/// Reads the prefix length out of a network mask given as raw bytes.
///
/// # Errors
/// - [`AddrError::InvalidByteArrayLength`] if `mask` is neither 4 nor 16 bytes long
/// - [`AddrError::InvalidNetmask`] if a one bit follows a zero bit (like `255.63.0.0`)
pub fn prefix_from_network_mask(mask: &[u8]) -> Result<u8, AddrError> {
    prefix_of(&ByteVector::from_slice(mask)?).ok_or(AddrError::InvalidNetmask)
}

pub fn is_network_mask(mask: &[u8]) -> bool {
    prefix_from_network_mask(mask).is_ok()
}

/// Checks whether `mask` consists of zero bits followed only by one bits.
pub fn is_network_host_mask(mask: &[u8]) -> bool {
    ByteVector::from_slice(mask).is_ok_and(|mask| prefix_of(&!mask).is_some())
}

/// Checks whether the first `prefix` bits of both byte sequences are equal. Whole bytes are compared directly, the final partial
/// byte is compared after shifting out its host bits. A prefix beyond the sequence length compares the complete sequences.
///
/// # Errors
/// [`AddrError::MatchNetworkMismatchingLength`] if the sequences have different lengths.
pub fn match_network(first: &[u8], second: &[u8], prefix: u8) -> Result<bool, AddrError> {
    if first.len() != second.len() {
        return Err(AddrError::MatchNetworkMismatchingLength);
    }

    let mut remaining = usize::from(prefix);
    for (first, second) in first.iter().zip(second) {
        if remaining == 0 {
            break;
        }

        if remaining >= 8 {
            if first != second {
                return Ok(false);
            }
            remaining -= 8;
        } else {
            let shift = 8 - remaining;
            if (first >> shift) != (second >> shift) {
                return Ok(false);
            }
            remaining = 0;
        }
    }
    Ok(true)
}
