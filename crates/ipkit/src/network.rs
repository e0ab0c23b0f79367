//! This module implements networks in CIDR notation (`192.168.11.160/27`). A network is an address paired with a prefix length, every
//! derived value (mask, network and broadcast address, usable host range) is computed from these two.
//!
//! ## References
//! - [Classless Inter-domain Routing (CIDR), RFC 4632](https://datatracker.ietf.org/doc/html/rfc4632)
//! - [Using 31-Bit Prefixes on IPv4 Point-to-Point Links, RFC 3021](https://datatracker.ietf.org/doc/html/rfc3021)

use crate::{
    address::Address,
    bytes::ByteVector,
    ipv4::ParseFlags,
    mask,
};
use core::{
    fmt::{
        Display,
        Formatter,
    },
    str::FromStr,
};
use ipkit_common::AddrError;
use log::debug;

/// This value represents an address with a prefix length. The address is kept as given, so `192.168.11.169/27` remembers its host
/// bits; use [`Network::network_address`] for the canonical form. The mask is computed once on construction.
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Debug)]
pub struct Network {
    address: Address,
    prefix: u8,
    mask: ByteVector,
}

impl Network {
    /// # Errors
    /// [`AddrError::InvalidNetmaskLength`] if `prefix` is greater than the bit length of the address.
    pub fn new<A: Into<Address>>(address: A, prefix: u8) -> Result<Self, AddrError> {
        let address = address.into();
        let mask = mask::from_prefix_length(prefix, address.family())?;
        Ok(Self { address, prefix, mask })
    }

    /// # Errors
    /// - [`AddrError::InvalidByteArrayLength`] if `bytes` is neither 4 nor 16 bytes long
    /// - [`AddrError::InvalidNetmaskLength`] if `prefix` is greater than the bit length of the address
    pub fn from_bytes(bytes: &[u8], prefix: u8) -> Result<Self, AddrError> {
        Self::new(Address::from_slice(bytes)?, prefix)
    }

    pub fn parse(text: &str) -> Result<Self, AddrError> {
        Self::parse_with(text, ParseFlags::default())
    }

    /// Parses `address/prefix`, reading the IPv4 part with the notations enabled in `flags`.
    ///
    /// # Errors
    /// - [`AddrError::InvalidCidrString`] if there is no `/` followed by a decimal prefix length
    /// - [`AddrError::InvalidIpString`] if the address part is no valid address
    /// - [`AddrError::InvalidNetmaskLength`] if the prefix length exceeds the bit length of the address
    pub fn parse_with(text: &str, flags: ParseFlags) -> Result<Self, AddrError> {
        let Some((address, prefix)) = text
            .rsplit_once('/')
            .filter(|(address, prefix)| !address.is_empty() && !prefix.is_empty() && prefix.bytes().all(|byte| byte.is_ascii_digit()))
        else {
            debug!("Rejected network literal '{}' => {}", text, AddrError::InvalidCidrString);
            return Err(AddrError::InvalidCidrString);
        };

        let address = Address::parse_with(address, flags)?;
        let prefix = prefix.parse::<u8>().map_err(|_| AddrError::InvalidNetmaskLength)?;
        Self::new(address, prefix)
    }

    pub const fn address(&self) -> &Address {
        &self.address
    }

    pub const fn prefix(&self) -> u8 {
        self.prefix
    }

    pub const fn host_bits(&self) -> u8 {
        self.address.bit_len() - self.prefix
    }

    /// Returns the count of addresses in this network, `None` for `::/0` whose count does not fit into 128 bits.
    pub const fn number_of_addresses(&self) -> Option<u128> {
        1u128.checked_shl(self.host_bits() as u32)
    }

    pub const fn mask(&self) -> ByteVector {
        self.mask
    }

    pub fn host_mask(&self) -> ByteVector {
        !self.mask
    }

    fn apply_mask(&self, mask: ByteVector, operation: impl Fn(u8, u8) -> u8) -> ByteVector {
        let address = self.address.to_byte_vector();
        address.zip_with(&mask, operation).unwrap_or(address)
    }

    pub fn network_address_bytes(&self) -> ByteVector {
        self.apply_mask(self.mask, |address, mask| address & mask)
    }

    pub fn broadcast_address_bytes(&self) -> ByteVector {
        self.apply_mask(self.host_mask(), |address, mask| address | mask)
    }

    /// Returns the first usable host. Networks with at most two addresses (`/31`, `/32`, `/127`, `/128`) have no reserved network
    /// address, so this is the network address itself.
    pub fn first_host_bytes(&self) -> ByteVector {
        let bytes = self.network_address_bytes();
        match self.host_bits() > 1 {
            true => bytes.increment(),
            false => bytes,
        }
    }

    /// Returns the last usable host. Networks with at most two addresses have no reserved broadcast address, so this is the
    /// broadcast address itself.
    pub fn last_host_bytes(&self) -> ByteVector {
        let bytes = self.broadcast_address_bytes();
        match self.host_bits() > 1 {
            true => bytes.decrement(),
            false => bytes,
        }
    }

    pub fn network_address(&self) -> Address {
        Address::from(self.network_address_bytes())
    }

    pub fn broadcast_address(&self) -> Address {
        Address::from(self.broadcast_address_bytes())
    }

    pub fn first_host(&self) -> Address {
        Address::from(self.first_host_bytes())
    }

    pub fn last_host(&self) -> Address {
        Address::from(self.last_host_bytes())
    }

    /// Checks whether `bytes` shares the first `prefix` bits with this network. Bytes of the other family are never contained.
    pub fn contains<B: AsRef<[u8]>>(&self, bytes: B) -> bool {
        self.try_contains(bytes).unwrap_or(false)
    }

    /// # Errors
    /// [`AddrError::MatchNetworkMismatchingLength`] if `bytes` does not have the length of this network's address.
    pub fn try_contains<B: AsRef<[u8]>>(&self, bytes: B) -> Result<bool, AddrError> {
        mask::match_network(self.address.as_ref(), bytes.as_ref(), self.prefix)
    }
}

impl Display for Network {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> core::fmt::Result {
        write!(formatter, "{}/{}", self.address, self.prefix)
    }
}

impl FromStr for Network {
    type Err = AddrError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        Self::parse(string)
    }
}
