//! Move account / object addresses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VisMoveError};

/// Number of bytes in a Sui address.
pub const ADDRESS_LENGTH: usize = 32;

/// A 32-byte Sui address, also used for object and package ids.
///
/// Parsing accepts the `0x` prefix followed by 1 to 64 hex digits; short
/// forms such as `0x2` are left-padded with zeros the way the chain
/// normalizes them. The canonical textual form is always 66 characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MoveAddress([u8; ADDRESS_LENGTH]);

impl MoveAddress {
    pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);

    pub fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Canonical `0x` + 64 hex digit form.
    pub fn to_canonical_string(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl FromStr for MoveAddress {
    type Err = VisMoveError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| VisMoveError::invalid_address(s, "address must have prefix 0x"))?;
        if digits.is_empty() || digits.len() > ADDRESS_LENGTH * 2 {
            return Err(VisMoveError::invalid_address(
                s,
                "address must have between 1 and 64 hex digits",
            ));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(VisMoveError::invalid_address(s, "address must be a hex number"));
        }

        let padded = format!("{:0>width$}", digits, width = ADDRESS_LENGTH * 2);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| VisMoveError::invalid_address(s, e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for MoveAddress {
    type Error = VisMoveError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MoveAddress> for String {
    fn from(value: MoveAddress) -> Self {
        value.to_canonical_string()
    }
}

impl fmt::Display for MoveAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl fmt::Debug for MoveAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveAddress({})", self)
    }
}

/// Strict check for full-length ids (`0x` + 64 hex digits).
///
/// Wallet accounts are always reported in this form.
pub fn validate_sui_id(value: &str) -> Result<()> {
    if value.len() != 2 + ADDRESS_LENGTH * 2 {
        return Err(VisMoveError::invalid_address(
            value,
            "address must have length 66 chars",
        ));
    }
    value.parse::<MoveAddress>().map(|_| ())
}
