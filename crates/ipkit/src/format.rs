//! Text rendering of byte vectors. IPv4 is always written as four dot-separated decimal octets. IPv6 has three renderings:
//! - normalized: eight groups of lowercase hex without leading zeros (`2001:db8:0:0:0:0:0:1`)
//! - fixed length: every group padded to four digits (`2001:0db8:0000:0000:0000:0000:0000:0001`)
//! - compressed: the normalized form with the longest run of two or more zero groups replaced by `::`, the leftmost run winning ties,
//!   as recommended by [RFC 5952](https://datatracker.ietf.org/doc/html/rfc5952#section-4.2) (`2001:db8::1`)
//!
//! IPv4-mapped addresses (`::ffff:0:0/96`) render their last 32 bits as dotted decimal in all three forms. A zone identifier is
//! appended as `%zone`.

use crate::ipv6::is_ipv4_mapped;
use core::fmt::{
    Display,
    Formatter,
    Result,
    Write,
};

pub(crate) fn segments(bytes: &[u8; 16]) -> [u16; 8] {
    let mut segments = [0u16; 8];
    for (segment, pair) in segments.iter_mut().zip(bytes.chunks_exact(2)) {
        *segment = u16::from_be_bytes([pair[0], pair[1]]);
    }
    segments
}

pub(crate) fn write_ipv4<W: Write>(writer: &mut W, bytes: &[u8; 4]) -> Result {
    write!(writer, "{}.{}.{}.{}", bytes[0], bytes[1], bytes[2], bytes[3])
}

/// Displays an IPv6 address without `::` compression, either normalized or with every group padded to four digits.
pub(crate) struct Uncompressed<'a> {
    bytes: &'a [u8; 16],
    zone: Option<&'a str>,
    fixed_length: bool,
}

impl<'a> Uncompressed<'a> {
    pub(crate) const fn normalized(bytes: &'a [u8; 16], zone: Option<&'a str>) -> Self {
        Self {
            bytes,
            zone,
            fixed_length: false,
        }
    }

    pub(crate) const fn fixed_length(bytes: &'a [u8; 16], zone: Option<&'a str>) -> Self {
        Self {
            bytes,
            zone,
            fixed_length: true,
        }
    }
}

impl Display for Uncompressed<'_> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result {
        write_ipv6_uncompressed(formatter, self.bytes, self.zone, self.fixed_length)
    }
}

pub(crate) fn write_ipv6_compressed<W: Write>(writer: &mut W, bytes: &[u8; 16], zone: Option<&str>) -> Result {
    let mapped = is_ipv4_mapped(bytes);
    let segments = segments(bytes);
    let groups = &segments[..group_count(mapped)];

    match longest_zero_run(groups) {
        Some((start, length)) => {
            let tail = &groups[start + length..];
            write_groups(writer, &groups[..start], false)?;
            writer.write_str("::")?;
            write_groups(writer, tail, false)?;
            if mapped {
                if !tail.is_empty() {
                    writer.write_char(':')?;
                }
                write_mapped_suffix(writer, bytes)?;
            }
        }
        None => {
            write_groups(writer, groups, false)?;
            if mapped {
                writer.write_char(':')?;
                write_mapped_suffix(writer, bytes)?;
            }
        }
    }
    write_zone(writer, zone)
}

fn write_ipv6_uncompressed<W: Write>(writer: &mut W, bytes: &[u8; 16], zone: Option<&str>, fixed_length: bool) -> Result {
    let mapped = is_ipv4_mapped(bytes);
    let segments = segments(bytes);
    write_groups(writer, &segments[..group_count(mapped)], fixed_length)?;
    if mapped {
        writer.write_char(':')?;
        write_mapped_suffix(writer, bytes)?;
    }
    write_zone(writer, zone)
}

const fn group_count(mapped: bool) -> usize {
    if mapped { 6 } else { 8 }
}

fn write_groups<W: Write>(writer: &mut W, groups: &[u16], fixed_length: bool) -> Result {
    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            writer.write_char(':')?;
        }
        if fixed_length {
            write!(writer, "{:04x}", group)?;
        } else {
            write!(writer, "{:x}", group)?;
        }
    }
    Ok(())
}

fn write_mapped_suffix<W: Write>(writer: &mut W, bytes: &[u8; 16]) -> Result {
    write!(writer, "{}.{}.{}.{}", bytes[12], bytes[13], bytes[14], bytes[15])
}

fn write_zone<W: Write>(writer: &mut W, zone: Option<&str>) -> Result {
    match zone {
        Some(zone) => write!(writer, "%{}", zone),
        None => Ok(()),
    }
}

/// Finds the longest run of at least two zero groups as `(start, length)`.
fn longest_zero_run(groups: &[u16]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut index = 0;
    while index < groups.len() {
        if groups[index] != 0 {
            index += 1;
            continue;
        }

        let start = index;
        while index < groups.len() && groups[index] == 0 {
            index += 1;
        }

        let length = index - start;
        if length >= 2 && best.map_or(true, |(_, best_length)| length > best_length) {
            best = Some((start, length));
        }
    }
    best
}
