use crate::{
    bytes::ByteVector,
    ipv4::{
        Ipv4,
        ParseFlags,
    },
    ipv6::Ipv6,
    mask,
    network::Network,
    ranges::RangeItem,
};
use alloc::{
    string::String,
    vec::Vec,
};
use core::{
    fmt::{
        Display,
        Formatter,
    },
    net::IpAddr,
    str::FromStr,
};
use ipkit_common::{
    AddrError,
    Family,
};
use log::debug;

/// This enum represents an address of either family. It is the value produced by the family-agnostic parsers and the address part
/// of every [`Network`].
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Debug)]
pub enum Address {
    V4(Ipv4),
    V6(Ipv6),
}

impl Address {
    pub fn parse(text: &str) -> Result<Self, AddrError> {
        Self::parse_with(text, ParseFlags::default())
    }

    /// Parses `text` as IPv4 literal (with the notations enabled in `flags`) and falls back to IPv6.
    ///
    /// # Errors
    /// - [`AddrError::MissingIPv4ParserBase`] if `flags` enables no numeral base
    /// - [`AddrError::InvalidIpString`] if `text` is neither an IPv4 nor an IPv6 literal
    pub fn parse_with(text: &str, flags: ParseFlags) -> Result<Self, AddrError> {
        match Ipv4::parse_with(text, flags) {
            Ok(address) => return Ok(Self::V4(address)),
            Err(AddrError::MissingIPv4ParserBase) => return Err(AddrError::MissingIPv4ParserBase),
            Err(_) => {}
        }

        Ipv6::parse(text).map(Self::V6).map_err(|error| {
            debug!("Rejected address literal '{}' => {}", text, error);
            AddrError::InvalidIpString
        })
    }

    /// # Errors
    /// [`AddrError::InvalidByteArrayLength`] if `bytes` is neither 4 nor 16 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddrError> {
        ByteVector::from_slice(bytes).map(Self::from)
    }

    /// # Errors
    /// See [`ByteVector::from_values`].
    pub fn from_values<T>(values: &[T]) -> Result<Self, AddrError>
    where
        T: Copy + TryInto<u8>,
    {
        ByteVector::from_values(values).map(Self::from)
    }

    pub const fn family(&self) -> Family {
        match self {
            Self::V4(_) => Family::IPv4,
            Self::V6(_) => Family::IPv6,
        }
    }

    pub const fn bit_len(&self) -> u8 {
        self.family().bit_len()
    }

    pub const fn to_byte_vector(&self) -> ByteVector {
        match self {
            Self::V4(address) => address.to_byte_vector(),
            Self::V6(address) => address.to_byte_vector(),
        }
    }

    /// Returns a copy of the address bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_byte_vector().to_vec()
    }

    pub fn zone(&self) -> Option<&str> {
        match self {
            Self::V4(_) => None,
            Self::V6(address) => address.zone(),
        }
    }

    pub fn is_equal(&self, bytes: &[u8]) -> bool {
        self.as_ref() == bytes
    }

    pub fn to_normalized_string(&self) -> String {
        match self {
            Self::V4(address) => address.to_normalized_string(),
            Self::V6(address) => address.to_normalized_string(),
        }
    }

    /// Returns the IPv4 address itself or the IPv4 address embedded in an IPv4-mapped IPv6 address.
    ///
    /// # Errors
    /// [`AddrError::InvalidIPv6IPv4Conversion`] if this is an IPv6 address outside of `::ffff:0:0/96`.
    pub fn to_ipv4_address(&self) -> Result<Ipv4, AddrError> {
        match self {
            Self::V4(address) => Ok(*address),
            Self::V6(address) => address.to_ipv4_address(),
        }
    }

    pub fn contained_by<N: Into<RangeItem>>(&self, network: N) -> bool {
        network.into().contains(&self.to_byte_vector())
    }

    /// # Errors
    /// [`AddrError::MatchNetworkMismatchingLength`] if the network belongs to the other family.
    pub fn try_contained_by(&self, network: &Network) -> Result<bool, AddrError> {
        network.try_contains(self.as_ref())
    }

    /// Returns the name of the special-purpose range containing this address, `"unicast"` if there is none.
    pub fn range(&self) -> &'static str {
        match self {
            Self::V4(address) => address.range().name(),
            Self::V6(address) => address.range().name(),
        }
    }

    /// # Errors
    /// [`AddrError::InvalidNetmask`] if the address is not a contiguous run of one bits followed by zero bits.
    pub fn prefix_length_from_network_mask(&self) -> Result<u8, AddrError> {
        mask::prefix_from_network_mask(self.as_ref())
    }
}

impl Display for Address {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::V4(address) => Display::fmt(address, formatter),
            Self::V6(address) => Display::fmt(address, formatter),
        }
    }
}

impl FromStr for Address {
    type Err = AddrError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Self::parse(string)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        match self {
            Self::V4(address) => address.as_ref(),
            Self::V6(address) => address.as_ref(),
        }
    }
}

impl From<ByteVector> for Address {
    fn from(value: ByteVector) -> Self {
        match value {
            ByteVector::V4(bytes) => Self::V4(Ipv4::new(bytes)),
            ByteVector::V6(bytes) => Self::V6(Ipv6::new(bytes)),
        }
    }
}

impl From<Ipv4> for Address {
    fn from(value: Ipv4) -> Self {
        Self::V4(value)
    }
}

impl From<Ipv6> for Address {
    fn from(value: Ipv6) -> Self {
        Self::V6(value)
    }
}

impl From<IpAddr> for Address {
    fn from(value: IpAddr) -> Self {
        match value {
            IpAddr::V4(address) => Self::V4(address.into()),
            IpAddr::V6(address) => Self::V6(address.into()),
        }
    }
}

impl From<Address> for IpAddr {
    fn from(value: Address) -> Self {
        match value {
            Address::V4(address) => IpAddr::V4(address.into()),
            Address::V6(address) => IpAddr::V6(address.into()),
        }
    }
}
