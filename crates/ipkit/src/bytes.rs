use crate::format;
use alloc::vec::Vec;
use core::{
    fmt::{
        Display,
        Formatter,
    },
    ops::Not,
};
use ipkit_common::{
    AddrError,
    Family,
};

/// This enum is the binary form of an address, a mask or a network in network byte order. The variant fixes the length, 4 bytes for
/// IPv4 and 16 bytes for IPv6.
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Copy, Debug)]
pub enum ByteVector {
    V4([u8; 4]),
    V6([u8; 16]),
}

impl ByteVector {
    /// Copies `bytes` into a byte vector of the matching family.
    ///
    /// # Errors
    /// [`AddrError::InvalidByteArrayLength`] if `bytes` is neither 4 nor 16 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddrError> {
        match bytes.len() {
            4 => {
                let mut array = [0u8; 4];
                array.copy_from_slice(bytes);
                Ok(Self::V4(array))
            }
            16 => {
                let mut array = [0u8; 16];
                array.copy_from_slice(bytes);
                Ok(Self::V6(array))
            }
            _ => Err(AddrError::InvalidByteArrayLength),
        }
    }

    /// Builds a byte vector from wider integers, validating that every value fits into a byte. This is the entry point for callers
    /// that hold addresses as `u16`, `i32` or similar.
    ///
    /// # Errors
    /// - [`AddrError::InvalidByteArrayLength`] if `values` is neither 4 nor 16 elements long
    /// - [`AddrError::InvalidIPv4ByteArray`] or [`AddrError::InvalidIPv6ByteArray`] if a value is outside of `0..=255`
    pub fn from_values<T>(values: &[T]) -> Result<Self, AddrError>
    where
        T: Copy + TryInto<u8>,
    {
        let family = Family::from_byte_len(values.len()).ok_or(AddrError::InvalidByteArrayLength)?;
        let error = match family {
            Family::IPv4 => AddrError::InvalidIPv4ByteArray,
            Family::IPv6 => AddrError::InvalidIPv6ByteArray,
        };

        let mut bytes = Self::zeroed(family);
        for (byte, value) in bytes.as_mut_slice().iter_mut().zip(values) {
            *byte = (*value).try_into().map_err(|_| error)?;
        }
        Ok(bytes)
    }

    pub const fn zeroed(family: Family) -> Self {
        match family {
            Family::IPv4 => Self::V4([0; 4]),
            Family::IPv6 => Self::V6([0; 16]),
        }
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

    pub const fn len(&self) -> usize {
        self.family().byte_len()
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[u8] {
        match self {
            Self::V4(bytes) => bytes,
            Self::V6(bytes) => bytes,
        }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Self::V4(bytes) => bytes,
            Self::V6(bytes) => bytes,
        }
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Adds one to the big-endian number, carrying across byte boundaries. `ff.ff.ff.ff` wraps around to zero.
    pub fn increment(&self) -> Self {
        let mut bytes = *self;
        for byte in bytes.as_mut_slice().iter_mut().rev() {
            let (value, overflow) = byte.overflowing_add(1);
            *byte = value;
            if !overflow {
                break;
            }
        }
        bytes
    }

    /// Subtracts one from the big-endian number, borrowing across byte boundaries. Zero wraps around to all ones.
    pub fn decrement(&self) -> Self {
        let mut bytes = *self;
        for byte in bytes.as_mut_slice().iter_mut().rev() {
            let (value, underflow) = byte.overflowing_sub(1);
            *byte = value;
            if !underflow {
                break;
            }
        }
        bytes
    }

    /// Combines two vectors of the same family byte by byte. Returns `None` when the families differ.
    pub(crate) fn zip_with(&self, other: &Self, operation: impl Fn(u8, u8) -> u8) -> Option<Self> {
        if self.family() != other.family() {
            return None;
        }

        let mut bytes = *self;
        for (byte, other) in bytes.as_mut_slice().iter_mut().zip(other.as_slice()) {
            *byte = operation(*byte, *other);
        }
        Some(bytes)
    }
}

impl Not for ByteVector {
    type Output = ByteVector;

    fn not(self) -> Self::Output {
        let mut bytes = self;
        for byte in bytes.as_mut_slice() {
            *byte = !*byte;
        }
        bytes
    }
}

impl AsRef<[u8]> for ByteVector {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl From<[u8; 4]> for ByteVector {
    fn from(value: [u8; 4]) -> Self {
        Self::V4(value)
    }
}

impl From<[u8; 16]> for ByteVector {
    fn from(value: [u8; 16]) -> Self {
        Self::V6(value)
    }
}

impl TryFrom<&[u8]> for ByteVector {
    type Error = AddrError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(value)
    }
}

impl Display for ByteVector {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::V4(bytes) => format::write_ipv4(formatter, bytes),
            Self::V6(bytes) => format::write_ipv6_compressed(formatter, bytes, None),
        }
    }
}
