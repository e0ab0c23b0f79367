//! Shared building blocks of the ipkit crates: the categorical error type every fallible operation reports and the address family
//! discriminator.

#![no_std]

pub mod macros;

use thiserror::Error;

/// This enum lists every way a parse, construction or comparison can fail. Each variant has a fixed numeric [`AddrError::code`].
#[derive(Debug, Error, Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Copy)]
#[repr(u8)]
pub enum AddrError {
    #[error("invalid binary input length")]
    InvalidByteArrayLength = 0,
    #[error("invalid netmask length")]
    InvalidNetmaskLength = 1,
    #[error("invalid netmask")]
    InvalidNetmask = 2,
    #[error("invalid ip string")]
    InvalidIpString = 3,
    #[error("string is not formatted like CIDR range")]
    InvalidCidrString = 4,

    #[error("invalid IPv4 parser flag")]
    InvalidIPv4ParserFlag = 5,
    #[error("none of \"decimal\", \"octet\", \"hex\" are present in permission list")]
    MissingIPv4ParserBase = 6,
    #[error("invalid IPv4 string")]
    InvalidIPv4String = 7,
    #[error("IPv4 octet should fit in unsigned byte")]
    InvalidIPv4ByteArray = 8,
    #[error("IPv4 octet count should be 4")]
    InvalidIPv4ByteArrayLength = 9,

    #[error("invalid IPv6 string")]
    InvalidIPv6String = 10,
    #[error("invalid IPv4 string (IPv6 transitional IPv4)")]
    InvalidIPv6TransitionalString = 11,
    #[error("invalid amount of IPv6 parts")]
    InvalidIPv6AmountOfParts = 12,
    #[error("IPv6 input array length should be 8 or 16")]
    InvalidIPv6InputArrayLength = 13,
    #[error("IPv6 part should fit in 16 bits")]
    InvalidIPv6PartArray = 14,
    #[error("IPv6 byte should fit in 8 bits")]
    InvalidIPv6ByteArray = 15,
    #[error("invalid zoneId argument")]
    InvalidIPv6Zone = 16,
    #[error("trying to convert a generic ipv6 address to ipv4")]
    InvalidIPv6IPv4Conversion = 17,

    #[error("cannot match network for objects with different lengths")]
    MatchNetworkMismatchingLength = 18,
}

impl AddrError {
    pub const fn code(&self) -> u8 {
        *self as u8
    }
}

pub type Result<T> = core::result::Result<T, AddrError>;

crate::name_enum! {
    /// This value represents the family of an address. The family decides the byte length of every byte vector, mask and network that
    /// belongs to it.
    #[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Hash, Clone, Copy)]
    pub enum Family {
        IPv4 = "ipv4",
        IPv6 = "ipv6"
    }
}

impl Family {
    pub const fn byte_len(&self) -> usize {
        match self {
            Self::IPv4 => 4,
            Self::IPv6 => 16,
        }
    }

    pub const fn bit_len(&self) -> u8 {
        match self {
            Self::IPv4 => 32,
            Self::IPv6 => 128,
        }
    }

    /// Returns the family whose byte vectors have exactly `length` bytes.
    pub const fn from_byte_len(length: usize) -> Option<Self> {
        match length {
            4 => Some(Self::IPv4),
            16 => Some(Self::IPv6),
            _ => None,
        }
    }
}
