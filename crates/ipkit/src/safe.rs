//! `Option` returning variants of the top-level entry points, for call sites that don't care about the reason of a failure.

use crate::{
    mask,
    Address,
    ByteVector,
    Ipv4,
    Network,
    ParseFlags,
    RangeItem,
};
use alloc::string::String;
use ipkit_common::Family;

pub fn parse_address(text: &str) -> Option<Address> {
    crate::parse_address(text).ok()
}

pub fn parse_address_with(text: &str, flags: ParseFlags) -> Option<Address> {
    crate::parse_address_with(text, flags).ok()
}

pub fn parse_cidr(text: &str) -> Option<Network> {
    crate::parse_cidr(text).ok()
}

pub fn parse_cidr_with(text: &str, flags: ParseFlags) -> Option<Network> {
    crate::parse_cidr_with(text, flags).ok()
}

pub fn parse_ipv4(text: &str) -> Option<Ipv4> {
    crate::parse_ipv4(text).ok()
}

pub fn parse_ipv4_with(text: &str, flags: ParseFlags) -> Option<Ipv4> {
    crate::parse_ipv4_with(text, flags).ok()
}

pub fn address_from_bytes(bytes: &[u8]) -> Option<Address> {
    crate::address_from_bytes(bytes).ok()
}

pub fn network_from_bytes(bytes: &[u8], prefix: u8) -> Option<Network> {
    crate::network_from_bytes(bytes, prefix).ok()
}

pub fn to_string(bytes: &[u8]) -> Option<String> {
    crate::to_string(bytes).ok()
}

pub fn to_valid_string<T>(values: &[T]) -> Option<String>
where
    T: Copy + TryInto<u8>,
{
    crate::to_valid_string(values).ok()
}

pub fn from_prefix_length(prefix: u8, family: Family) -> Option<ByteVector> {
    mask::from_prefix_length(prefix, family).ok()
}

pub fn prefix_from_network_mask(mask: &[u8]) -> Option<u8> {
    mask::prefix_from_network_mask(mask).ok()
}

pub fn match_network(first: &[u8], second: &[u8], prefix: u8) -> Option<bool> {
    mask::match_network(first, second, prefix).ok()
}

pub fn match_network_range<N, R>(bytes: &[u8], table: &[(N, R)], default: N) -> Option<N>
where
    N: Copy,
    R: AsRef<[RangeItem]>,
{
    crate::match_network_range(bytes, table, default).ok()
}
