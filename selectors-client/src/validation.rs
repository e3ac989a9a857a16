//! Input validation for user-supplied signatures
//!
//! Values are trimmed before matching. Anything that fails here never reaches the network.

use once_cell::sync::Lazy;
use regex::Regex;
use std::{fmt, str::FromStr};

use crate::error::ClientError;

static HEX_SIGNATURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{8}$").expect("hex signature pattern"));

// Argument type names are not checked, only the shape.
static TEXT_SIGNATURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*\([^)]*\)$").expect("text signature pattern")
});

/// A 4-byte selector written as `0x` followed by 8 hex digits, case preserved.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HexSignature(String);

impl HexSignature {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against another selector string.
    pub fn same_selector(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }

    pub(crate) fn from_bytes(bytes: [u8; 4]) -> Self {
        HexSignature(format!("0x{}", hex::encode(bytes)))
    }
}

impl FromStr for HexSignature {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(ClientError::validation("please enter a hex signature"));
        }
        if !HEX_SIGNATURE_RE.is_match(value) {
            return Err(ClientError::validation(
                "invalid 4-byte hex signature (try: 0xa9059cbb)",
            ));
        }
        Ok(HexSignature(value.to_string()))
    }
}

impl fmt::Display for HexSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HexSignature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A function declaration such as `transfer(address,uint256)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextSignature(String);

impl TextSignature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TextSignature {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(ClientError::validation("please enter a function signature"));
        }
        if !TEXT_SIGNATURE_RE.is_match(value) {
            return Err(ClientError::validation(
                "invalid function signature format (try: transfer(address,uint256))",
            ));
        }
        Ok(TextSignature(value.to_string()))
    }
}

impl fmt::Display for TextSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TextSignature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
