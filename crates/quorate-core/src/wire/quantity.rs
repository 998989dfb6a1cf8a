use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

use super::{strip_hex_prefix, WireError};

/// Arbitrary precision unsigned integer in `0x`-prefixed hex form.
///
/// Decoding rejects an empty digit string, non-hex digits and leading zeros (`0x0` is the
/// only representation of zero). Equality and ordering are by magnitude.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(BigUint);

impl Quantity {
    #[must_use]
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    #[must_use]
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    #[must_use]
    pub fn into_biguint(self) -> BigUint {
        self.0
    }

    /// Returns the value as `u64` if it fits.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    /// Parses a hex quantity.
    ///
    /// # Errors
    ///
    /// - [`WireError::MissingPrefix`] if the string does not start with `0x`
    /// - [`WireError::InvalidHex`] for an empty digit string or non-hex characters
    /// - [`WireError::LeadingZero`] for `0x01`-style encodings
    pub fn parse_hex(input: &str) -> Result<Self, WireError> {
        let digits = strip_hex_prefix(input)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(WireError::InvalidHex(input.to_string()));
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(WireError::LeadingZero(input.to_string()));
        }
        BigUint::parse_bytes(digits.as_bytes(), 16)
            .map(Self)
            .ok_or_else(|| WireError::InvalidHex(input.to_string()))
    }

    #[must_use]
    pub fn encode(&self) -> String {
        format!("0x{:x}", self.0)
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<BigUint> for Quantity {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl FromStr for Quantity {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(de::Error::custom)
    }
}
