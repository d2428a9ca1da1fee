//! Checked EVM-style account identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account identifier: `0x` followed by 40 hex digits. Stored lowercase so
/// comparisons are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened `0x1234...abcd` form the UI layers display.
    pub fn short(&self) -> String {
        format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or(AddressParseError)?;
        match hex::decode(digits) {
            Ok(bytes) if bytes.len() == 20 => {
                Ok(Self(format!("0x{}", digits.to_ascii_lowercase())))
            }
            _ => Err(AddressParseError),
        }
    }
}

impl TryFrom<String> for Address {
    type Error = AddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not a 0x-prefixed 20-byte hex address")]
pub struct AddressParseError;
