//! This module implements the IPv6 address type and its textual parser. The parser understands the full text grammar of RFC 4291:
//! - up to eight groups of one to four hex digits, separated by colons
//! - a single `::` standing for one or more all-zero groups
//! - an embedded IPv4 literal in place of the last two groups (`::ffff:192.168.11.5`)
//! - a zone identifier suffix (`fe80::1%eth0`)
//!
//! ## References
//! - [Text Representation of Addresses, Section 2.2 RFC 4291](https://datatracker.ietf.org/doc/html/rfc4291#section-2.2)
//! - [IPv6 Scoped Address Architecture, Section 11 RFC 4007](https://datatracker.ietf.org/doc/html/rfc4007#section-11)
//! - [A Recommendation for IPv6 Address Text Representation, RFC 5952](https://datatracker.ietf.org/doc/html/rfc5952)

use crate::{
    bytes::ByteVector,
    format,
    ipv4::{
        self,
        Ipv4,
        ParseFlags,
    },
    mask,
    ranges::{
        classify,
        Ipv6Range,
        RangeItem,
        IPV6_SPECIAL_RANGES,
    },
};
use alloc::{
    string::{
        String,
        ToString,
    },
    vec::Vec,
};
use core::{
    fmt::{
        Display,
        Formatter,
    },
    net::Ipv6Addr,
    str::FromStr,
};
use ipkit_common::AddrError;
use log::{
    debug,
    trace,
};
use nom::{
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{
        all_consuming,
        map_res,
    },
    multi::separated_list1,
    IResult,
    Parser,
};

const IPV4_MAPPED_PREFIX: [u8; 12] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xFF, 0xFF];

/// Checks whether the bytes lie in the IPv4-mapped range `::ffff:0:0/96`.
pub(crate) fn is_ipv4_mapped(bytes: &[u8; 16]) -> bool {
    bytes[..12] == IPV4_MAPPED_PREFIX
}

fn hex_group(input: &str) -> IResult<&str, u16> {
    map_res(take_while_m_n(1, 4, |c: char| c.is_ascii_hexdigit()), |digits: &str| u16::from_str_radix(digits, 16)).parse(input)
}

fn hex_groups(input: &str) -> IResult<&str, Vec<u16>> {
    all_consuming(separated_list1(char(':'), hex_group)).parse(input)
}

fn parse_groups(text: &str) -> Result<Vec<u16>, AddrError> {
    hex_groups(text).map(|(_, groups)| groups).map_err(|_| AddrError::InvalidIPv6String)
}

fn is_valid_zone(zone: &str) -> bool {
    !zone.is_empty() && zone.bytes().all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.'))
}

/// Expands the colon separated groups of `text` to exactly `target` groups, filling the gap of a `::` with zero groups.
fn expand_groups(text: &str, target: usize) -> Result<Vec<u16>, AddrError> {
    let Some((head, tail)) = text.split_once("::") else {
        if text.is_empty() {
            return Err(AddrError::InvalidIPv6String);
        }

        let groups = parse_groups(text)?;
        return match groups.len() == target {
            true => Ok(groups),
            false => Err(AddrError::InvalidIPv6AmountOfParts),
        };
    };

    let head = if head.is_empty() { Vec::new() } else { parse_groups(head)? };
    let tail = if tail.is_empty() { Vec::new() } else { parse_groups(tail)? };
    if head.len() + tail.len() >= target {
        return Err(AddrError::InvalidIPv6AmountOfParts);
    }

    let mut groups = head;
    groups.resize(target - tail.len(), 0);
    groups.extend(tail);
    Ok(groups)
}

fn parse_without_zone(text: &str) -> Result<[u8; 16], AddrError> {
    if text.is_empty() || text.find("::") != text.rfind("::") {
        return Err(AddrError::InvalidIPv6String);
    }

    // The embedded IPv4 literal replaces the last two groups
    let (text, suffix) = match text.rsplit_once(':') {
        Some((head, tail)) if tail.contains('.') => {
            trace!("Reading '{}' as IPv6 literal with embedded IPv4 '{}'", text, tail);
            let suffix = ipv4::parse_bytes(tail, ParseFlags::BASES).map_err(|_| AddrError::InvalidIPv6TransitionalString)?;
            let head = match head.ends_with(':') {
                true => &text[..head.len() + 1],
                false => head,
            };
            (head, Some(suffix))
        }
        _ => (text, None),
    };

    let groups = expand_groups(text, if suffix.is_some() { 6 } else { 8 })?;
    let mut bytes = [0u8; 16];
    for (pair, group) in bytes.chunks_exact_mut(2).zip(&groups) {
        pair.copy_from_slice(&group.to_be_bytes());
    }
    if let Some(suffix) = suffix {
        bytes[12..].copy_from_slice(&suffix);
    }
    Ok(bytes)
}

/// Parses the IPv6 literal `text` into its sixteen bytes and the optional zone identifier.
///
/// # Errors
/// - [`AddrError::InvalidIPv6Zone`] if the text after `%` is empty or contains characters other than alphanumerics, `-`, `_` or `.`
/// - [`AddrError::InvalidIPv6String`] if the text is empty, has more than one `::` or a malformed group
/// - [`AddrError::InvalidIPv6AmountOfParts`] if the groups (including the `::` expansion) don't add up to 8
/// - [`AddrError::InvalidIPv6TransitionalString`] if the embedded IPv4 literal is malformed
pub fn parse_bytes(text: &str) -> Result<([u8; 16], Option<&str>), AddrError> {
    let (address, zone) = match text.split_once('%') {
        Some((address, zone)) if is_valid_zone(zone) => (address, Some(zone)),
        Some(_) => {
            debug!("Rejected IPv6 literal '{}' => {}", text, AddrError::InvalidIPv6Zone);
            return Err(AddrError::InvalidIPv6Zone);
        }
        None => (text, None),
    };

    match parse_without_zone(address) {
        Ok(bytes) => Ok((bytes, zone)),
        Err(error) => {
            debug!("Rejected IPv6 literal '{}' => {}", text, error);
            Err(error)
        }
    }
}

/// This value represents an IPv6 address with its optional zone identifier. Two addresses are only equal if their zones are equal
/// too.
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Debug)]
pub struct Ipv6 {
    bytes: [u8; 16],
    zone: Option<String>,
}

impl Ipv6 {
    pub const UNSPECIFIED: Ipv6 = Ipv6::new([0; 16]);
    pub const LOOPBACK: Ipv6 = Ipv6::new([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);

    pub const fn new(bytes: [u8; 16]) -> Self {
        Self { bytes, zone: None }
    }

    /// # Errors
    /// [`AddrError::InvalidIPv6Zone`] if `zone` is empty.
    pub fn with_zone(bytes: [u8; 16], zone: &str) -> Result<Self, AddrError> {
        if zone.is_empty() {
            return Err(AddrError::InvalidIPv6Zone);
        }

        Ok(Self {
            bytes,
            zone: Some(zone.to_string()),
        })
    }

    pub fn from_segments(segments: [u16; 8]) -> Self {
        let mut bytes = [0u8; 16];
        for (pair, segment) in bytes.chunks_exact_mut(2).zip(segments) {
            pair.copy_from_slice(&segment.to_be_bytes());
        }
        Self::new(bytes)
    }

    /// Builds the address from either eight 16-bit groups or sixteen bytes of any integer type.
    ///
    /// # Errors
    /// - [`AddrError::InvalidIPv6InputArrayLength`] if `values` has neither 8 nor 16 elements
    /// - [`AddrError::InvalidIPv6PartArray`] if one of eight values is outside of `0..=0xFFFF`
    /// - [`AddrError::InvalidIPv6ByteArray`] if one of sixteen values is outside of `0..=255`
    pub fn from_values<T>(values: &[T]) -> Result<Self, AddrError>
    where
        T: Copy + TryInto<u8> + TryInto<u16>,
    {
        match values.len() {
            8 => {
                let mut segments = [0u16; 8];
                for (segment, value) in segments.iter_mut().zip(values) {
                    *segment = <T as TryInto<u16>>::try_into(*value).map_err(|_| AddrError::InvalidIPv6PartArray)?;
                }
                Ok(Self::from_segments(segments))
            }
            16 => match ByteVector::from_values::<T>(values)? {
                ByteVector::V6(bytes) => Ok(Self::new(bytes)),
                ByteVector::V4(_) => Err(AddrError::InvalidIPv6InputArrayLength),
            },
            _ => Err(AddrError::InvalidIPv6InputArrayLength),
        }
    }

    /// # Errors
    /// [`AddrError::InvalidIPv6InputArrayLength`] if `bytes` is not exactly 16 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddrError> {
        let bytes = <[u8; 16]>::try_from(bytes).map_err(|_| AddrError::InvalidIPv6InputArrayLength)?;
        Ok(Self::new(bytes))
    }

    pub fn parse(text: &str) -> Result<Self, AddrError> {
        let (bytes, zone) = parse_bytes(text)?;
        Ok(Self {
            bytes,
            zone: zone.map(ToString::to_string),
        })
    }

    pub fn is_valid(text: &str) -> bool {
        parse_bytes(text).is_ok()
    }

    pub const fn octets(&self) -> [u8; 16] {
        self.bytes
    }

    pub fn segments(&self) -> [u16; 8] {
        format::segments(&self.bytes)
    }

    pub const fn to_byte_vector(&self) -> ByteVector {
        ByteVector::V6(self.bytes)
    }

    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    /// Compares the address bytes only, the zone identifier is ignored.
    pub fn is_equal(&self, bytes: &[u8]) -> bool {
        self.bytes == bytes
    }

    pub fn is_ipv4_mapped(&self) -> bool {
        is_ipv4_mapped(&self.bytes)
    }

    /// Extracts the IPv4 address embedded in an IPv4-mapped address (`::ffff:a.b.c.d`).
    ///
    /// # Errors
    /// [`AddrError::InvalidIPv6IPv4Conversion`] if this address is not in the IPv4-mapped range.
    pub fn to_ipv4_address(&self) -> Result<Ipv4, AddrError> {
        if !self.is_ipv4_mapped() {
            return Err(AddrError::InvalidIPv6IPv4Conversion);
        }
        Ok(Ipv4::new([self.bytes[12], self.bytes[13], self.bytes[14], self.bytes[15]]))
    }

    pub fn to_normalized_string(&self) -> String {
        format::Uncompressed::normalized(&self.bytes, self.zone()).to_string()
    }

    pub fn to_fixed_length_string(&self) -> String {
        format::Uncompressed::fixed_length(&self.bytes, self.zone()).to_string()
    }

    pub fn contained_by<N: Into<RangeItem>>(&self, network: N) -> bool {
        network.into().contains(&self.to_byte_vector())
    }

    /// Returns the first special-purpose range (in declaration order) containing this address, or [`Ipv6Range::Unicast`].
    pub fn range(&self) -> Ipv6Range {
        classify(&self.to_byte_vector(), &IPV6_SPECIAL_RANGES, Ipv6Range::Unicast)
    }

    /// # Errors
    /// [`AddrError::InvalidNetmask`] if the address is not a contiguous run of one bits followed by zero bits.
    pub fn prefix_length_from_network_mask(&self) -> Result<u8, AddrError> {
        mask::prefix_from_network_mask(&self.bytes)
    }
}

impl Display for Ipv6 {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> core::fmt::Result {
        format::write_ipv6_compressed(formatter, &self.bytes, self.zone())
    }
}

impl FromStr for Ipv6 {
    type Err = AddrError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Self::parse(string)
    }
}

impl AsRef<[u8]> for Ipv6 {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<[u8; 16]> for Ipv6 {
    fn from(value: [u8; 16]) -> Self {
        Self::new(value)
    }
}

impl From<Ipv6Addr> for Ipv6 {
    fn from(value: Ipv6Addr) -> Self {
        Self::new(value.octets())
    }
}

impl From<Ipv6> for Ipv6Addr {
    fn from(value: Ipv6) -> Self {
        Ipv6Addr::from(value.bytes)
    }
}
