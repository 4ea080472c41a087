//! Snowflake ids for every persisted row
//!
//! Layout (most significant first):
//! - 42 bits: milliseconds since [`Snowflake::EPOCH`]
//! - 10 bits: machine id
//! - 12 bits: per-millisecond sequence

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

const MACHINE_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const MAX_MACHINE_ID: u16 = (1 << MACHINE_BITS) - 1;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;

/// 64-bit sortable identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// 2023-01-01T00:00:00Z in milliseconds
    pub const EPOCH: i64 = 1_672_531_200_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Milliseconds since the Unix epoch at which this id was minted
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> (MACHINE_BITS + SEQUENCE_BITS)) + Self::EPOCH
    }

    #[inline]
    pub fn machine_id(&self) -> u16 {
        ((self.0 >> SEQUENCE_BITS) & i64::from(MAX_MACHINE_ID)) as u16
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp())
            .single()
            .unwrap_or_default()
    }

    /// Parse the decimal form used in URLs and JSON
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SnowflakeParseError::Empty);
        }
        trimmed
            .parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("id is empty")]
    Empty,

    #[error("invalid id: {0}")]
    InvalidFormat(String),
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Strings in JSON so browsers keep full precision
impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(v) => Ok(Snowflake(v)),
            Raw::Str(s) => Snowflake::parse(&s).map_err(de::Error::custom),
        }
    }
}

/// Id generator shared by every service in the process
pub struct SnowflakeGenerator {
    machine_id: u16,
    // (last timestamp, sequence within that millisecond)
    state: Mutex<(i64, i64)>,
}

impl SnowflakeGenerator {
    /// Machine ids above 1023 are masked into range.
    pub fn new(machine_id: u16) -> Self {
        Self {
            machine_id: machine_id & MAX_MACHINE_ID,
            state: Mutex::new((0, 0)),
        }
    }

    pub fn machine_id(&self) -> u16 {
        self.machine_id
    }

    pub fn generate(&self) -> Snowflake {
        let (timestamp, sequence) = {
            let mut state = self.state.lock();
            *state = advance(*state, now_millis());
            *state
        };

        Snowflake(
            ((timestamp - Snowflake::EPOCH) << (MACHINE_BITS + SEQUENCE_BITS))
                | (i64::from(self.machine_id) << SEQUENCE_BITS)
                | sequence,
        )
    }
}

/// Next `(timestamp, sequence)` after `last`, given the wall clock.
///
/// Never waits. When the clock is behind `last` (it jumped backwards) or a
/// millisecond's sequence runs out, the timestamp moves one millisecond ahead
/// of `last` instead.
fn advance((last, seq): (i64, i64), wall: i64) -> (i64, i64) {
    if wall > last {
        return (wall, 0);
    }
    match (seq + 1) & SEQUENCE_MASK {
        0 => (last + 1, 0),
        next => (last, next),
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(Snowflake::EPOCH)
}
