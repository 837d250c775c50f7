//! Member ID - database-generated 64-bit identifier

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier of a roster member, assigned by the database on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MemberId(i64);

impl MemberId {
    /// Create a new MemberId from a raw i64 value
    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Parse from string representation.
    ///
    /// Only positive integers are accepted, since `BIGSERIAL` starts at 1.
    pub fn parse(s: &str) -> Result<Self, MemberIdParseError> {
        match s.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(MemberIdParseError::InvalidFormat),
        }
    }
}

/// Error when parsing a MemberId from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MemberIdParseError {
    #[error("invalid member id format")]
    InvalidFormat,
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MemberId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<MemberId> for i64 {
    fn from(id: MemberId) -> Self {
        id.0
    }
}

impl std::str::FromStr for MemberId {
    type Err = MemberIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MemberId::parse(s)
    }
}

// Serialize as a plain JSON number
impl Serialize for MemberId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

// Deserialize from string or number (path segments arrive as strings)
impl<'de> Deserialize<'de> for MemberId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct MemberIdVisitor;

        impl Visitor<'_> for MemberIdVisitor {
            type Value = MemberId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a positive integer or numeric string member id")
            }

            fn visit_i64<E>(self, value: i64) -> Result<MemberId, E>
            where
                E: de::Error,
            {
                if value > 0 {
                    Ok(MemberId(value))
                } else {
                    Err(de::Error::custom("member id must be positive"))
                }
            }

            fn visit_u64<E>(self, value: u64) -> Result<MemberId, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map_err(|_| de::Error::custom("member id out of range"))
                    .and_then(|v| self.visit_i64(v))
            }

            fn visit_str<E>(self, value: &str) -> Result<MemberId, E>
            where
                E: de::Error,
            {
                MemberId::parse(value).map_err(|_| de::Error::custom("invalid member id string"))
            }
        }

        deserializer.deserialize_any(MemberIdVisitor)
    }
}
