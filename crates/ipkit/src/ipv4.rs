//! This module implements the IPv4 address type and its textual parser. Beside the usual dotted-decimal notation, the parser accepts
//! the legacy notations still understood by `inet_aton` and most browsers, each of them enabled by one of the [`ParseFlags`]:
//!
//! | Flag       | Example                         | Meaning                                                              |
//! |------------|---------------------------------|----------------------------------------------------------------------|
//! | `DECIMAL`  | `192.168.0.1`                   | Parts without leading zero are decimal                               |
//! | `OCTAL`    | `0300.0250.0.01`                | Parts with a leading zero are octal                                  |
//! | `HEX`      | `0xC0.0xA8.0x0.0x1`             | Parts with a leading `0x` are hexadecimal (case-insensitive)         |
//! | `VARIABLE` | `192.168.1`, `192.11010305`     | Two or three parts, the last part fills all remaining bytes          |
//! | `LONG`     | `3232235777`                    | One unsigned 32-bit number without any dots                          |
//!
//! ## References
//! - [inet_aton(3), Linux manual page](https://man7.org/linux/man-pages/man3/inet_aton.3.html)
//! - [Textual Representation of IPv4 and IPv6 Addresses, draft-main-ipaddr-text-rep](https://datatracker.ietf.org/doc/html/draft-main-ipaddr-text-rep-02#section-2)

use crate::{
    bytes::ByteVector,
    format,
    ipv6::Ipv6,
    mask,
    ranges::{
        classify,
        Ipv4Range,
        RangeItem,
        IPV4_SPECIAL_RANGES,
    },
};
use alloc::{
    string::{
        String,
        ToString,
    },
    vec::Vec,
};
use bitflags::bitflags;
use core::{
    fmt::{
        Display,
        Formatter,
    },
    net::Ipv4Addr,
    str::FromStr,
};
use ipkit_common::AddrError;
use log::{
    debug,
    trace,
};
use nom::{
    character::complete::{
        alphanumeric1,
        char,
        digit1,
    },
    combinator::all_consuming,
    multi::separated_list1,
    IResult,
    Parser,
};

bitflags! {
    /// This value represents the set of notations the IPv4 parser accepts. At least one numeral base (`DECIMAL`, `OCTAL` or `HEX`) has
    /// to be enabled, the default enables every notation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ParseFlags: u8 {
        /// Parts without leading zero are read as decimal numbers
        const DECIMAL = 0b0000_0001;
        /// Parts with a leading zero are read as octal numbers
        const OCTAL = 0b0000_0010;
        /// Parts with a leading `0x` are read as hexadecimal numbers
        const HEX = 0b0000_0100;
        /// Two to four parts are accepted, the last part absorbs the remaining bytes
        const VARIABLE = 0b0000_1000;
        /// A single number without dots is accepted as the whole address
        const LONG = 0b0001_0000;
    }
}

impl ParseFlags {
    /// Every numeral base, without the variable and long notations.
    pub const BASES: Self = Self::DECIMAL.union(Self::OCTAL).union(Self::HEX);
}

impl Default for ParseFlags {
    fn default() -> Self {
        Self::all()
    }
}

impl FromStr for ParseFlags {
    type Err = AddrError;

    /// Reads a comma separated list of notation names (`decimal`, `octet` or `octal`, `hex`, `variable`, `long`).
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let mut flags = Self::empty();
        for name in string.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            flags |= match name {
                name if name.eq_ignore_ascii_case("decimal") => Self::DECIMAL,
                name if name.eq_ignore_ascii_case("octet") || name.eq_ignore_ascii_case("octal") => Self::OCTAL,
                name if name.eq_ignore_ascii_case("hex") => Self::HEX,
                name if name.eq_ignore_ascii_case("variable") => Self::VARIABLE,
                name if name.eq_ignore_ascii_case("long") => Self::LONG,
                _ => return Err(AddrError::InvalidIPv4ParserFlag),
            };
        }
        Ok(flags)
    }
}

fn split_parts(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(separated_list1(char('.'), alphanumeric1)).parse(input)
}

/// Reads a single part, picking the base by the leading characters. Returns `None` if the base is not enabled, the part contains
/// digits invalid in its base or the value overflows 32 bits.
fn parse_numeral(part: &str, flags: ParseFlags) -> Option<u32> {
    let (digits, radix, required) = if let Some(digits) = part.strip_prefix("0x").or_else(|| part.strip_prefix("0X")) {
        (digits, 16, ParseFlags::HEX)
    } else if part == "0" {
        return flags.intersects(ParseFlags::DECIMAL | ParseFlags::OCTAL).then_some(0);
    } else if let Some(digits) = part.strip_prefix('0') {
        (digits, 8, ParseFlags::OCTAL)
    } else {
        (part, 10, ParseFlags::DECIMAL)
    };

    if digits.is_empty() || !flags.contains(required) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}

/// Packs the parts of the dotted notation. Every part but the last is one byte, the last part fills the remaining bytes.
fn pack_parts(parts: &[&str], flags: ParseFlags) -> Option<[u8; 4]> {
    let (last, leading) = parts.split_last()?;
    let mut bytes = [0u8; 4];
    for (byte, part) in bytes.iter_mut().zip(leading) {
        *byte = u8::try_from(parse_numeral(part, flags)?).ok()?;
    }

    let remaining = 4 - leading.len();
    let last = parse_numeral(last, flags)?;
    if remaining < 4 && last >> (remaining * 8) != 0 {
        return None;
    }
    bytes[leading.len()..].copy_from_slice(&last.to_be_bytes()[4 - remaining..]);
    Some(bytes)
}

/// Parses the IPv4 literal `text` into its four bytes, accepting the notations enabled in `flags`.
///
/// # Errors
/// - [`AddrError::MissingIPv4ParserBase`] if `flags` enables no numeral base
/// - [`AddrError::InvalidIPv4String`] if `text` is not a literal in one of the enabled notations
pub fn parse_bytes(text: &str, flags: ParseFlags) -> Result<[u8; 4], AddrError> {
    if !flags.intersects(ParseFlags::BASES) {
        return Err(AddrError::MissingIPv4ParserBase);
    }

    let parts = match split_parts(text) {
        Ok((_, parts)) => parts,
        Err(_) => {
            debug!("Rejected IPv4 literal '{}' => {}", text, AddrError::InvalidIPv4String);
            return Err(AddrError::InvalidIPv4String);
        }
    };

    let bytes = match parts.len() {
        4 => pack_parts(&parts, flags),
        2 | 3 if flags.contains(ParseFlags::VARIABLE) => {
            trace!("Reading '{}' as variable IPv4 literal with {} parts", text, parts.len());
            pack_parts(&parts, flags)
        }
        1 if flags.contains(ParseFlags::LONG) => {
            trace!("Reading '{}' as long IPv4 literal", text);
            parse_numeral(parts[0], flags).map(u32::to_be_bytes)
        }
        _ => None,
    };

    bytes.ok_or_else(|| {
        debug!("Rejected IPv4 literal '{}' => {}", text, AddrError::InvalidIPv4String);
        AddrError::InvalidIPv4String
    })
}

fn is_decimal_octet(part: &str) -> bool {
    // Three digit octets may not start with a zero
    let digits = part.as_bytes();
    match digits.len() {
        1 | 2 => true,
        3 => matches!(digits[0], b'1' | b'2') && part.parse::<u8>().is_ok(),
        _ => false,
    }
}

/// This value represents an IPv4 address. It is a plain copy type around the four address bytes in network order.
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Copy, Debug)]
pub struct Ipv4 {
    bytes: [u8; 4],
}

impl Ipv4 {
    pub const UNSPECIFIED: Ipv4 = Ipv4::new([0, 0, 0, 0]);
    pub const BROADCAST: Ipv4 = Ipv4::new([255, 255, 255, 255]);

    pub const fn new(bytes: [u8; 4]) -> Self {
        Self { bytes }
    }

    /// # Errors
    /// [`AddrError::InvalidIPv4ByteArrayLength`] if `bytes` is not exactly 4 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddrError> {
        let bytes = <[u8; 4]>::try_from(bytes).map_err(|_| AddrError::InvalidIPv4ByteArrayLength)?;
        Ok(Self::new(bytes))
    }

    /// Builds the address from four integers of any type, validating that each of them fits into a byte.
    ///
    /// # Errors
    /// - [`AddrError::InvalidIPv4ByteArrayLength`] if `values` does not have 4 elements
    /// - [`AddrError::InvalidIPv4ByteArray`] if a value is outside of `0..=255`
    pub fn from_values<T>(values: &[T]) -> Result<Self, AddrError>
    where
        T: Copy + TryInto<u8>,
    {
        if values.len() != 4 {
            return Err(AddrError::InvalidIPv4ByteArrayLength);
        }

        match ByteVector::from_values(values)? {
            ByteVector::V4(bytes) => Ok(Self::new(bytes)),
            ByteVector::V6(_) => Err(AddrError::InvalidIPv4ByteArrayLength),
        }
    }

    pub fn parse(text: &str) -> Result<Self, AddrError> {
        Self::parse_with(text, ParseFlags::default())
    }

    pub fn parse_with(text: &str, flags: ParseFlags) -> Result<Self, AddrError> {
        parse_bytes(text, flags).map(Self::new)
    }

    pub fn is_valid(text: &str, flags: ParseFlags) -> bool {
        parse_bytes(text, flags).is_ok()
    }

    /// Checks whether `text` is the plain dotted-decimal notation with four parts (`192.168.0.1`). Parts of up to two digits may
    /// carry a leading zero.
    pub fn is_valid_four_part_decimal(text: &str) -> bool {
        let result: IResult<&str, Vec<&str>> = all_consuming(separated_list1(char('.'), digit1)).parse(text);
        result.is_ok_and(|(_, parts)| parts.len() == 4 && parts.iter().all(|part| is_decimal_octet(part)))
    }

    pub const fn from_long(value: u32) -> Self {
        Self::new(value.to_be_bytes())
    }

    pub const fn to_long(&self) -> u32 {
        u32::from_be_bytes(self.bytes)
    }

    pub const fn octets(&self) -> [u8; 4] {
        self.bytes
    }

    pub const fn to_byte_vector(&self) -> ByteVector {
        ByteVector::V4(self.bytes)
    }

    pub fn is_equal(&self, bytes: &[u8]) -> bool {
        self.bytes == bytes
    }

    /// Returns the bytes of this address embedded into the IPv4-mapped IPv6 range (`::ffff:a.b.c.d`).
    pub const fn to_ipv4_mapped_bytes(&self) -> [u8; 16] {
        let [a, b, c, d] = self.bytes;
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xFF, 0xFF, a, b, c, d]
    }

    pub fn to_ipv4_mapped_address(&self) -> Ipv6 {
        Ipv6::new(self.to_ipv4_mapped_bytes())
    }

    pub fn to_normalized_string(&self) -> String {
        self.to_string()
    }

    pub fn contained_by<N: Into<RangeItem>>(&self, network: N) -> bool {
        network.into().contains(&self.to_byte_vector())
    }

    /// Returns the first special-purpose range (in declaration order) containing this address, or [`Ipv4Range::Unicast`].
    pub fn range(&self) -> Ipv4Range {
        classify(&self.to_byte_vector(), &IPV4_SPECIAL_RANGES, Ipv4Range::Unicast)
    }

    /// Reads this address as a network mask and returns its prefix length.
    ///
    /// # Errors
    /// [`AddrError::InvalidNetmask`] if the address is not a contiguous run of one bits followed by zero bits.
    pub fn prefix_length_from_network_mask(&self) -> Result<u8, AddrError> {
        mask::prefix_from_network_mask(&self.bytes)
    }
}

impl Display for Ipv4 {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> core::fmt::Result {
        format::write_ipv4(formatter, &self.bytes)
    }
}

impl FromStr for Ipv4 {
    type Err = AddrError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Self::parse(string)
    }
}

impl AsRef<[u8]> for Ipv4 {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<[u8; 4]> for Ipv4 {
    fn from(value: [u8; 4]) -> Self {
        Self::new(value)
    }
}

impl From<Ipv4Addr> for Ipv4 {
    fn from(value: Ipv4Addr) -> Self {
        Self::new(value.octets())
    }
}

impl From<Ipv4> for Ipv4Addr {
    fn from(value: Ipv4) -> Self {
        Ipv4Addr::from(value.bytes)
    }
}
