use crate::bb84_protocol::security_level;
use crate::bb84_states::Bit;
use crate::error::{Bb84Error, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Sender bits kept after sifting, in ascending position order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SiftedKey {
    bits: Vec<Bit>,
}

impl SiftedKey {
    pub fn new(bits: Vec<Bit>) -> Self {
        SiftedKey { bits }
    }

    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn security_level(&self) -> f64 {
        security_level(self.len())
    }

    /// Pack the bits into bytes, least significant bit first.
    /// A trailing partial byte is zero-padded.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | ((bool::from(bit) as u8) << i))
            })
            .collect()
    }

    /// SHA-256 over the packed key, usable as a 256-bit symmetric key.
    ///
    /// The bit length is hashed ahead of the packed bytes, so keys that differ
    /// only by trailing zero bits do not collide.
    pub fn derive_key_material(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update((self.len() as u64).to_le_bytes());
        hasher.update(self.to_bytes());
        hasher.finalize().into()
    }

    pub fn fingerprint(&self) -> String {
        hex::encode(self.derive_key_material())
    }
}

impl From<Vec<Bit>> for SiftedKey {
    fn from(bits: Vec<Bit>) -> Self {
        SiftedKey::new(bits)
    }
}

impl fmt::Display for SiftedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: String = self.bits.iter().map(|bit| bit.as_char()).collect();
        f.write_str(&rendered)
    }
}

impl FromStr for SiftedKey {
    type Err = Bb84Error;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .map(|c| Bit::from_char(c).ok_or(Bb84Error::InvalidKeyString(c)))
            .collect::<Result<Vec<_>>>()
            .map(SiftedKey::new)
    }
}
