use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::{strip_hex_prefix, WireError};

/// 20-byte account address.
pub type Address = FixedBytes<20>;
/// 32-byte hash (block, transaction, storage slot value).
pub type Hash = FixedBytes<32>;
/// 8-byte proof-of-work nonce carried in block headers.
pub type Nonce = FixedBytes<8>;
/// 256-byte logs bloom filter.
pub type Bloom = FixedBytes<256>;

fn decode_hex(input: &str) -> Result<Vec<u8>, WireError> {
    let digits = strip_hex_prefix(input)?;
    hex::decode(digits).map_err(|_| WireError::InvalidHex(input.to_string()))
}

/// Byte array whose length is part of the type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedBytes<const N: usize>(pub [u8; N]);

impl<const N: usize> FixedBytes<N> {
    pub const LEN: usize = N;

    /// Parses a `0x`-prefixed hex string of exactly `N` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::InvalidLength`] when the decoded length is not `N`, and the
    /// prefix/hex errors for malformed input.
    pub fn parse_hex(input: &str) -> Result<Self, WireError> {
        let raw = decode_hex(input)?;
        let actual = raw.len();
        <[u8; N]>::try_from(raw)
            .map(Self)
            .map_err(|_| WireError::InvalidLength { expected: N, actual })
    }

    /// Parses a `0x`-prefixed hex number of at most `N` bytes, left-padding it with zeros.
    ///
    /// Leading zeros and an odd digit count are accepted, so `0x1`, `0x01` and the full
    /// `2 * N` digit form all denote the same value.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::InvalidLength`] when more than `N` bytes are given and
    /// [`WireError::InvalidHex`] for an empty or non-hex digit string.
    pub fn parse_padded_hex(input: &str) -> Result<Self, WireError> {
        let digits = strip_hex_prefix(input)?;
        if digits.is_empty() {
            return Err(WireError::InvalidHex(input.to_string()));
        }
        if digits.len() > 2 * N {
            return Err(WireError::InvalidLength { expected: N, actual: digits.len().div_ceil(2) });
        }
        let padded = format!("{digits:0>width$}", width = 2 * N);
        let mut out = [0u8; N];
        hex::decode_to_slice(padded, &mut out)
            .map_err(|_| WireError::InvalidHex(input.to_string()))?;
        Ok(Self(out))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    #[must_use]
    pub fn encode(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl<const N: usize> Default for FixedBytes<N> {
    fn default() -> Self {
        Self([0u8; N])
    }
}

impl<const N: usize> From<[u8; N]> for FixedBytes<N> {
    fn from(value: [u8; N]) -> Self {
        Self(value)
    }
}

impl<const N: usize> fmt::Debug for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<const N: usize> fmt::Display for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<const N: usize> Serialize for FixedBytes<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de, const N: usize> Deserialize<'de> for FixedBytes<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(de::Error::custom)
    }
}

/// Variable-length byte array. The empty array encodes as `0x`.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub bytes::Bytes);

impl Bytes {
    /// Parses a `0x`-prefixed hex string with an even number of digits.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::MissingPrefix`] or [`WireError::InvalidHex`] for malformed input.
    pub fn parse_hex(input: &str) -> Result<Self, WireError> {
        decode_hex(input).map(|raw| Self(bytes::Bytes::from(raw)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn encode(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(value: Vec<u8>) -> Self {
        Self(bytes::Bytes::from(value))
    }
}

impl From<&'static [u8]> for Bytes {
    fn from(value: &'static [u8]) -> Self {
        Self(bytes::Bytes::from_static(value))
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl Serialize for Bytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(de::Error::custom)
    }
}
