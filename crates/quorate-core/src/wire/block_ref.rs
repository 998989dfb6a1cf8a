use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::{Quantity, WireError};

/// A block reference used in request arguments.
///
/// Tags only ever appear in requests. Responses always carry concrete numbers, and the
/// proxy engine replaces `latest`/`pending` with a consensus block number before fan-out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockRef {
    Earliest,
    Latest,
    Pending,
    Number(Quantity),
}

impl BlockRef {
    pub const LATEST_SENTINEL: i64 = -1;
    pub const PENDING_SENTINEL: i64 = -2;
    pub const EARLIEST_SENTINEL: i64 = -3;

    /// Negative sentinel for tags, `None` for concrete block numbers.
    #[must_use]
    pub fn sentinel(&self) -> Option<i64> {
        match self {
            Self::Latest => Some(Self::LATEST_SENTINEL),
            Self::Pending => Some(Self::PENDING_SENTINEL),
            Self::Earliest => Some(Self::EARLIEST_SENTINEL),
            Self::Number(_) => None,
        }
    }

    /// Returns `true` for `latest` and `pending`, the tags resolved through consensus.
    #[must_use]
    pub fn needs_resolution(&self) -> bool {
        matches!(self, Self::Latest | Self::Pending)
    }

    /// Parses a tag name or a hex block number.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnsupportedTag`] for tags other than the three known ones and the
    /// [`Quantity`] errors for malformed numbers.
    pub fn parse(input: &str) -> Result<Self, WireError> {
        match input {
            "earliest" => Ok(Self::Earliest),
            "latest" => Ok(Self::Latest),
            "pending" => Ok(Self::Pending),
            "safe" | "finalized" => Err(WireError::UnsupportedTag(input.to_string())),
            _ => Quantity::parse_hex(input).map(Self::Number),
        }
    }

    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Earliest => "earliest".to_string(),
            Self::Latest => "latest".to_string(),
            Self::Pending => "pending".to_string(),
            Self::Number(n) => n.encode(),
        }
    }
}

impl From<Quantity> for BlockRef {
    fn from(value: Quantity) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl Serialize for BlockRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for BlockRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse(&s).map_err(de::Error::custom)
    }
}
