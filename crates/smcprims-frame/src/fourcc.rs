use std::fmt;
use std::str::FromStr;

use crate::error::FrameError;

/// A four-character code packed big-endian into 32 bits.
///
/// `"TC0P"` is `0x54433050`: the first character lands in the most
/// significant byte. Keys and data types share this representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FourCharCode(pub u32);

impl FourCharCode {
    /// The code produced from absent input.
    pub const ZERO: Self = Self(0);

    /// Pack up to four bytes of `text`.
    ///
    /// Shorter input is NUL-padded on the right and longer input is truncated.
    /// This never fails; use [`str::parse`] for validated user input.
    pub fn from_text(text: &str) -> Self {
        Self::from_prefix(text.as_bytes())
    }

    /// Pack up to four bytes, NUL-padding short input.
    pub fn from_prefix(bytes: &[u8]) -> Self {
        let mut packed = [0u8; 4];
        let len = bytes.len().min(4);
        packed[..len].copy_from_slice(&bytes[..len]);
        Self::from_bytes(packed)
    }

    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Unpack into text, trimming trailing NUL padding.
    pub fn to_text(self) -> String {
        let bytes = self.to_bytes();
        let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        bytes[..end].iter().map(|&b| char::from(b)).collect()
    }

    /// Unpack into a NUL-terminated five-byte buffer.
    pub fn to_c_chars(self) -> [u8; 5] {
        let [a, b, c, d] = self.to_bytes();
        [a, b, c, d, 0]
    }
}

impl fmt::Display for FourCharCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for FourCharCode {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| FrameError::InvalidKey {
            text: s.to_string(),
            reason,
        };
        if s.is_empty() {
            return Err(invalid("key must not be empty"));
        }
        if !s.is_ascii() {
            return Err(invalid("key must be ASCII"));
        }
        if s.len() > 4 {
            return Err(invalid("key must be at most 4 characters"));
        }
        Ok(Self::from_text(s))
    }
}

impl From<u32> for FourCharCode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<FourCharCode> for u32 {
    fn from(value: FourCharCode) -> Self {
        value.0
    }
}

impl From<[u8; 4]> for FourCharCode {
    fn from(value: [u8; 4]) -> Self {
        Self::from_bytes(value)
    }
}
