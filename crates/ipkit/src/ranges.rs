//! Special-purpose address ranges and the classifier that maps an address to the name of its range. A range table is an ordered list
//! of `(name, networks)` pairs. Classification is first-hit in declaration order, not longest-prefix match, so the order of the
//! built-in tables is part of their meaning (`::ffff:0:0/96` is matched before the broader ranges that would also contain it).
//!
//! ## References
//! - [Special-Purpose IP Address Registries, RFC 6890](https://datatracker.ietf.org/doc/html/rfc6890)
//! - [IANA IPv4 Special-Purpose Address Registry](https://www.iana.org/assignments/iana-ipv4-special-registry/iana-ipv4-special-registry.xhtml)
//! - [IANA IPv6 Special-Purpose Address Registry](https://www.iana.org/assignments/iana-ipv6-special-registry/iana-ipv6-special-registry.xhtml)

use crate::{
    bytes::ByteVector,
    mask,
    network::Network,
};
use core::fmt::{
    Display,
    Formatter,
};
use ipkit_common::{
    name_enum,
    AddrError,
};

name_enum! {
    /// This enum lists the names of the built-in IPv4 ranges. [`Ipv4Range::Unicast`] is the result for every address outside of them.
    #[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy)]
    pub enum Ipv4Range {
        Unicast = "unicast",
        Unspecified = "unspecified",
        Broadcast = "broadcast",
        Multicast = "multicast",
        LinkLocal = "linkLocal",
        Loopback = "loopback",
        CarrierGradeNat = "carrierGradeNat",
        Private = "private",
        Reserved = "reserved"
    }
}

name_enum! {
    /// This enum lists the names of the built-in IPv6 ranges. [`Ipv6Range::Unicast`] is the result for every address outside of them.
    #[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy)]
    pub enum Ipv6Range {
        Unicast = "unicast",
        Unspecified = "unspecified",
        LinkLocal = "linkLocal",
        Multicast = "multicast",
        Loopback = "loopback",
        UniqueLocal = "uniqueLocal",
        Ipv4Mapped = "ipv4Mapped",
        Rfc6145 = "rfc6145",
        Rfc6052 = "rfc6052",
        SixToFour = "6to4",
        Teredo = "teredo",
        Reserved = "reserved"
    }
}

/// This value represents a single network entry of a range table. Unlike [`Network`] it keeps the bytes as given, the host bits are
/// ignored while matching.
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Copy, Debug)]
pub struct RangeItem {
    bytes: ByteVector,
    prefix: u8,
}

impl RangeItem {
    /// # Errors
    /// [`AddrError::InvalidNetmaskLength`] if `prefix` is greater than the bit length of `bytes`.
    pub const fn new(bytes: ByteVector, prefix: u8) -> Result<Self, AddrError> {
        if prefix > bytes.bit_len() {
            return Err(AddrError::InvalidNetmaskLength);
        }
        Ok(Self { bytes, prefix })
    }

    const fn v4(bytes: [u8; 4], prefix: u8) -> Self {
        Self {
            bytes: ByteVector::V4(bytes),
            prefix,
        }
    }

    const fn v6(bytes: [u8; 16], prefix: u8) -> Self {
        Self {
            bytes: ByteVector::V6(bytes),
            prefix,
        }
    }

    pub const fn bytes(&self) -> &ByteVector {
        &self.bytes
    }

    pub const fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Checks whether `bytes` shares the first `prefix` bits with this entry. Bytes of another family never match.
    pub fn contains(&self, bytes: &ByteVector) -> bool {
        mask::match_network(self.bytes.as_slice(), bytes.as_slice(), self.prefix).unwrap_or(false)
    }
}

impl From<&Network> for RangeItem {
    fn from(value: &Network) -> Self {
        Self {
            bytes: value.address().to_byte_vector(),
            prefix: value.prefix(),
        }
    }
}

impl From<Network> for RangeItem {
    fn from(value: Network) -> Self {
        Self::from(&value)
    }
}

impl Display for RangeItem {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> core::fmt::Result {
        write!(formatter, "{}/{}", self.bytes, self.prefix)
    }
}

pub static IPV4_SPECIAL_RANGES: [(Ipv4Range, &[RangeItem]); 8] = [
    (Ipv4Range::Unspecified, &[RangeItem::v4([0, 0, 0, 0], 8)]),
    (Ipv4Range::Broadcast, &[RangeItem::v4([255, 255, 255, 255], 32)]),
    (Ipv4Range::Multicast, &[RangeItem::v4([224, 0, 0, 0], 4)]),
    (Ipv4Range::LinkLocal, &[RangeItem::v4([169, 254, 0, 0], 16)]),
    (Ipv4Range::Loopback, &[RangeItem::v4([127, 0, 0, 0], 8)]),
    (Ipv4Range::CarrierGradeNat, &[RangeItem::v4([100, 64, 0, 0], 10)]),
    (
        Ipv4Range::Private,
        &[
            RangeItem::v4([10, 0, 0, 0], 8),
            RangeItem::v4([172, 16, 0, 0], 12),
            RangeItem::v4([192, 168, 0, 0], 16),
        ],
    ),
    (
        Ipv4Range::Reserved,
        &[
            RangeItem::v4([192, 0, 0, 0], 24),
            RangeItem::v4([192, 0, 2, 0], 24),
            RangeItem::v4([192, 88, 99, 0], 24),
            RangeItem::v4([198, 51, 100, 0], 24),
            RangeItem::v4([203, 0, 113, 0], 24),
            RangeItem::v4([240, 0, 0, 0], 4),
        ],
    ),
];

pub static IPV6_SPECIAL_RANGES: [(Ipv6Range, &[RangeItem]); 11] = [
    (Ipv6Range::Unspecified, &[RangeItem::v6([0; 16], 128)]),
    (Ipv6Range::LinkLocal, &[RangeItem::v6([0xFE, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], 10)]),
    (Ipv6Range::Multicast, &[RangeItem::v6([0xFF, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], 8)]),
    (Ipv6Range::Loopback, &[RangeItem::v6([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1], 128)]),
    (Ipv6Range::UniqueLocal, &[RangeItem::v6([0xFC, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], 7)]),
    (Ipv6Range::Ipv4Mapped, &[RangeItem::v6([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xFF, 0xFF, 0, 0, 0, 0], 96)]),
    (Ipv6Range::Rfc6145, &[RangeItem::v6([0, 0, 0, 0, 0, 0, 0, 0, 0xFF, 0xFF, 0, 0, 0, 0, 0, 0], 96)]),
    (Ipv6Range::Rfc6052, &[RangeItem::v6([0, 0x64, 0xFF, 0x9B, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], 96)]),
    (Ipv6Range::SixToFour, &[RangeItem::v6([0x20, 0x02, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], 16)]),
    (Ipv6Range::Teredo, &[RangeItem::v6([0x20, 0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], 32)]),
    (Ipv6Range::Reserved, &[RangeItem::v6([0x20, 0x01, 0x0D, 0xB8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], 32)]),
];

/// Returns the name of the first entry of `table` (in declaration order) with a network containing `bytes`, or `default` if none
/// does. Networks of the other family are skipped.
pub fn classify<N, R>(bytes: &ByteVector, table: &[(N, R)], default: N) -> N
where
    N: Copy,
    R: AsRef<[RangeItem]>,
{
    table
        .iter()
        .find(|(_, items)| items.as_ref().iter().any(|item| item.contains(bytes)))
        .map_or(default, |(name, _)| *name)
}
