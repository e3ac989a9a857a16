//! Local selector hashing: first 4 bytes of Keccak-256 of the text signature.

use sha3::{Digest, Keccak256};

use crate::validation::{HexSignature, TextSignature};

pub fn selector_bytes(text: &TextSignature) -> [u8; 4] {
    let mut hasher = Keccak256::new();
    hasher.update(text.as_str().as_bytes());
    let digest = hasher.finalize();
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// Selector the directory should report for `text`.
pub fn selector_of(text: &TextSignature) -> HexSignature {
    HexSignature::from_bytes(selector_bytes(text))
}
