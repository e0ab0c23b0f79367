//! This crate (ipkit project module) implements parsing, formatting and subnet arithmetic for IPv4 and IPv6 addresses without any
//! dependency on the standard library. Besides the usual notations, the parsers understand the legacy IPv4 notations (octal, hex,
//! variable part count, single number), IPv6 zone identifiers and IPv6 literals with an embedded IPv4 address. Every fallible operation
//! returns an [`AddrError`]; the [`safe`] module offers the same entry points returning `Option` instead.
//!
//! ## RFCs implemented
//! | RFC                                                       | Title                                                   | Usage                         |
//! |-----------------------------------------------------------|---------------------------------------------------------|-------------------------------|
//! | [RFC 4291](https://datatracker.ietf.org/doc/html/rfc4291) | IP Version 6 Addressing Architecture                    | IPv6 text grammar             |
//! | [RFC 4007](https://datatracker.ietf.org/doc/html/rfc4007) | IPv6 Scoped Address Architecture                        | Zone identifiers              |
//! | [RFC 5952](https://datatracker.ietf.org/doc/html/rfc5952) | A Recommendation for IPv6 Address Text Representation   | Compressed IPv6 output        |
//! | [RFC 4632](https://datatracker.ietf.org/doc/html/rfc4632) | Classless Inter-domain Routing (CIDR)                   | Networks and masks            |
//! | [RFC 3021](https://datatracker.ietf.org/doc/html/rfc3021) | Using 31-Bit Prefixes on IPv4 Point-to-Point Links      | Host range of `/31` networks  |
//! | [RFC 6890](https://datatracker.ietf.org/doc/html/rfc6890) | Special-Purpose IP Address Registries                   | Range classification          |
//! | [RFC 1918](https://datatracker.ietf.org/doc/html/rfc1918) | Address Allocation for Private Internets                | `private` range               |
//! | [RFC 6598](https://datatracker.ietf.org/doc/html/rfc6598) | IANA-Reserved IPv4 Prefix for Shared Address Space      | `carrierGradeNat` range       |
//! | [RFC 4193](https://datatracker.ietf.org/doc/html/rfc4193) | Unique Local IPv6 Unicast Addresses                     | `uniqueLocal` range           |
//! | [RFC 6052](https://datatracker.ietf.org/doc/html/rfc6052) | IPv6 Addressing of IPv4/IPv6 Translators                | `rfc6052` range               |
//! | [RFC 6145](https://datatracker.ietf.org/doc/html/rfc6145) | IP/ICMP Translation Algorithm                           | `rfc6145` range               |
//! | [RFC 3056](https://datatracker.ietf.org/doc/html/rfc3056) | Connection of IPv6 Domains via IPv4 Clouds              | `6to4` range                  |
//! | [RFC 4380](https://datatracker.ietf.org/doc/html/rfc4380) | Teredo: Tunneling IPv6 over UDP through NATs            | `teredo` range                |
//! | [RFC 3849](https://datatracker.ietf.org/doc/html/rfc3849) | IPv6 Address Prefix Reserved for Documentation          | `reserved` range              |
//!
//! ## Examples
//! ```
//! let network = ipkit::parse_cidr("192.168.11.169/27").unwrap();
//! assert_eq!(network.network_address().to_string(), "192.168.11.160");
//! assert_eq!(network.last_host().to_string(), "192.168.11.190");
//!
//! let address = ipkit::parse_address("::ffff:192.168.11.5").unwrap();
//! assert_eq!(address.range(), "ipv4Mapped");
//! assert!(ipkit::safe::parse_address("::ff::").is_none());
//! ```
//!
//! ## References
//! - [Wikipedia "IPv6 address"](https://en.wikipedia.org/wiki/IPv6_address)
//! - [Wikipedia "Classless Inter-Domain Routing"](https://en.wikipedia.org/wiki/Classless_Inter-Domain_Routing)
//! - [inet_aton(3), Linux manual page](https://man7.org/linux/man-pages/man3/inet_aton.3.html)

#![no_std]
extern crate alloc;

pub mod address;
pub mod bytes;
mod format;
pub mod ipv4;
pub mod ipv6;
pub mod mask;
pub mod network;
pub mod ranges;
pub mod safe;

pub use crate::{
    address::Address,
    bytes::ByteVector,
    ipv4::{
        Ipv4,
        ParseFlags,
    },
    ipv6::Ipv6,
    network::Network,
    ranges::{
        classify,
        Ipv4Range,
        Ipv6Range,
        RangeItem,
        IPV4_SPECIAL_RANGES,
        IPV6_SPECIAL_RANGES,
    },
};
pub use ipkit_common::{
    AddrError,
    Family,
};

use alloc::{
    string::{
        String,
        ToString,
    },
    vec::Vec,
};

/// Parses an IPv4 (all notations enabled) or IPv6 literal.
///
/// # Errors
/// [`AddrError::InvalidIpString`] if `text` is neither an IPv4 nor an IPv6 literal.
pub fn parse_address(text: &str) -> Result<Address, AddrError> {
    Address::parse(text)
}

pub fn parse_address_with(text: &str, flags: ParseFlags) -> Result<Address, AddrError> {
    Address::parse_with(text, flags)
}

/// Parses a network in CIDR notation (`address/prefix`).
///
/// # Errors
/// See [`Network::parse_with`].
pub fn parse_cidr(text: &str) -> Result<Network, AddrError> {
    Network::parse(text)
}

pub fn parse_cidr_with(text: &str, flags: ParseFlags) -> Result<Network, AddrError> {
    Network::parse_with(text, flags)
}

/// Parses an IPv4 literal (all notations enabled) or an IPv4-mapped IPv6 literal (`::ffff:192.168.11.5`) into an IPv4 address.
///
/// # Errors
/// See [`parse_ipv4_with`].
pub fn parse_ipv4(text: &str) -> Result<Ipv4, AddrError> {
    parse_ipv4_with(text, ParseFlags::default())
}

/// Parses an IPv4 literal in one of the notations enabled in `flags` or an IPv4-mapped IPv6 literal into an IPv4 address.
///
/// # Errors
/// - [`AddrError::MissingIPv4ParserBase`] if `flags` enables no numeral base
/// - [`AddrError::InvalidIPv6TransitionalString`] if `text` is an IPv6 literal outside of the IPv4-mapped range
/// - [`AddrError::InvalidIpString`] if `text` is neither an IPv4 nor an IPv6 literal
pub fn parse_ipv4_with(text: &str, flags: ParseFlags) -> Result<Ipv4, AddrError> {
    match Ipv4::parse_with(text, flags) {
        Ok(address) => return Ok(address),
        Err(AddrError::MissingIPv4ParserBase) => return Err(AddrError::MissingIPv4ParserBase),
        Err(_) => {}
    }

    let address = Ipv6::parse(text).map_err(|_| AddrError::InvalidIpString)?;
    address.to_ipv4_address().map_err(|_| AddrError::InvalidIPv6TransitionalString)
}

/// # Errors
/// [`AddrError::InvalidByteArrayLength`] if `bytes` is neither 4 nor 16 bytes long.
pub fn address_from_bytes(bytes: &[u8]) -> Result<Address, AddrError> {
    Address::from_slice(bytes)
}

/// # Errors
/// See [`Network::from_bytes`].
pub fn network_from_bytes(bytes: &[u8], prefix: u8) -> Result<Network, AddrError> {
    Network::from_bytes(bytes, prefix)
}

pub fn to_bytes(address: &Address) -> Vec<u8> {
    address.to_bytes()
}

/// Renders 4 bytes as dotted decimal and 16 bytes in the compressed IPv6 notation.
///
/// # Errors
/// [`AddrError::InvalidByteArrayLength`] if `bytes` is neither 4 nor 16 bytes long.
pub fn to_string(bytes: &[u8]) -> Result<String, AddrError> {
    ByteVector::from_slice(bytes).map(|bytes| bytes.to_string())
}

/// Validates that every value fits into a byte and renders the address like [`to_string`].
///
/// # Errors
/// See [`ByteVector::from_values`].
pub fn to_valid_string<T>(values: &[T]) -> Result<String, AddrError>
where
    T: Copy + TryInto<u8>,
{
    ByteVector::from_values(values).map(|bytes| bytes.to_string())
}

/// Checks whether `text` is an IPv4 (all notations enabled) or IPv6 literal.
pub fn is_valid(text: &str) -> bool {
    is_valid_with(text, ParseFlags::default())
}

pub fn is_valid_with(text: &str, flags: ParseFlags) -> bool {
    Ipv4::is_valid(text, flags) || Ipv6::is_valid(text)
}

/// Checks whether `values` has 4 or 16 elements that all fit into a byte.
pub fn is_valid_byte_array<T>(values: &[T]) -> bool
where
    T: Copy + TryInto<u8>,
{
    ByteVector::from_values(values).is_ok()
}

/// Classifies raw address bytes against a range table, see [`classify`].
///
/// # Errors
/// [`AddrError::InvalidByteArrayLength`] if `bytes` is neither 4 nor 16 bytes long.
pub fn match_network_range<N, R>(bytes: &[u8], table: &[(N, R)], default: N) -> Result<N, AddrError>
where
    N: Copy,
    R: AsRef<[RangeItem]>,
{
    Ok(classify(&ByteVector::from_slice(bytes)?, table, default))
}
