//! HSN codes
//!
//! Products are keyed by an eight digit HSN code. Codes typed by staff may
//! start with a zero; generated codes never do.

use std::{
    fmt::{self, Display, Formatter},
    ops::RangeInclusive,
    str::FromStr,
};

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

/// Number of digits in an HSN code.
pub const HSN_DIGITS: usize = 8;

/// Range generated codes are drawn from.
pub const GENERATED_HSN_RANGE: RangeInclusive<u32> = 10_000_000..=99_999_999;

/// Errors raised while parsing an HSN code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HsnError {
    /// The code was empty or whitespace.
    #[error("HSN code is empty")]
    Empty,

    /// The code was not exactly eight ASCII digits.
    #[error("HSN code must be {HSN_DIGITS} digits, got {0:?}")]
    Malformed(String),
}

/// Eight digit product code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HsnCode(String);

impl HsnCode {
    /// Draw a random code from [`GENERATED_HSN_RANGE`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(GENERATED_HSN_RANGE).to_string())
    }

    /// The code that follows this one, or `None` past `99999999`.
    pub fn next(&self) -> Option<Self> {
        let value: u32 = self.0.parse().ok()?;
        let next = value.checked_add(1)?;

        if next > *GENERATED_HSN_RANGE.end() {
            return None;
        }

        Some(Self(format!("{next:0width$}", width = HSN_DIGITS)))
    }

    /// Borrow the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HsnCode {
    type Err = HsnError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(HsnError::Empty);
        }

        if value.len() != HSN_DIGITS || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(HsnError::Malformed(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }
}

impl Display for HsnCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for HsnCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HsnCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Older rows keep the code in a numeric column.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text,
            Raw::Number(number) => format!("{number:0width$}", width = HSN_DIGITS),
        };

        text.parse().map_err(de::Error::custom)
    }
}
