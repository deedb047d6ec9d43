//! Asset symbol identifiers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum length of an asset symbol in bytes.
pub const MAX_SYMBOL_LEN: usize = 8;

/// An opaque fixed-width asset identifier.
///
/// Symbols are short ASCII tokens such as `sUSD` or `sEUR`, stored
/// inline as up to 8 bytes, NUL-padded. Equality and hashing are
/// byte-exact; no case folding is applied.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetSymbol([u8; MAX_SYMBOL_LEN]);

/// Errors from constructing an [`AssetSymbol`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetSymbolError {
    /// The symbol was empty.
    #[error("asset symbol must not be empty")]
    Empty,

    /// The symbol exceeded the fixed width.
    #[error("asset symbol {0:?} exceeds {MAX_SYMBOL_LEN} bytes")]
    TooLong(String),

    /// The symbol contained a byte outside printable ASCII.
    #[error("asset symbol {0:?} contains non-printable or non-ASCII bytes")]
    InvalidByte(String),
}

impl AssetSymbol {
    /// Create a symbol from a string token.
    pub fn new(code: &str) -> Result<Self, AssetSymbolError> {
        if code.is_empty() {
            return Err(AssetSymbolError::Empty);
        }
        if code.len() > MAX_SYMBOL_LEN {
            return Err(AssetSymbolError::TooLong(code.to_string()));
        }
        if !code.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(AssetSymbolError::InvalidByte(code.to_string()));
        }

        let mut bytes = [0u8; MAX_SYMBOL_LEN];
        bytes[..code.len()].copy_from_slice(code.as_bytes());
        Ok(Self(bytes))
    }

    /// Create a symbol from a static token, panicking on invalid
    /// input. Intended for compile-time constants and defaults.
    pub const fn from_static(code: &'static str) -> Self {
        let bytes = code.as_bytes();
        assert!(!bytes.is_empty() && bytes.len() <= MAX_SYMBOL_LEN);

        let mut out = [0u8; MAX_SYMBOL_LEN];
        let mut i = 0;
        while i < bytes.len() {
            assert!(bytes[i].is_ascii_graphic());
            out[i] = bytes[i];
            i += 1;
        }
        Self(out)
    }

    /// The symbol as a string slice, trailing padding trimmed.
    pub fn as_str(&self) -> &str {
        let end = self
            .0
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(MAX_SYMBOL_LEN);
        // Construction guarantees printable ASCII up to the padding.
        std::str::from_utf8(&self.0[..end]).unwrap_or("")
    }

    /// The raw fixed-width bytes, including padding.
    pub fn as_bytes(&self) -> &[u8; MAX_SYMBOL_LEN] {
        &self.0
    }
}

impl fmt::Display for AssetSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Debug for AssetSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetSymbol({:?})", self.as_str())
    }
}

impl FromStr for AssetSymbol {
    type Err = AssetSymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for AssetSymbol {
    type Error = AssetSymbolError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl Serialize for AssetSymbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AssetSymbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let sym = AssetSymbol::new("sUSD").unwrap();
        assert_eq!(sym.as_str(), "sUSD");
        assert_eq!(sym.to_string(), "sUSD");
        assert_eq!("sUSD".parse::<AssetSymbol>().unwrap(), sym);
    }

    #[test]
    fn test_byte_exact_equality() {
        let a = AssetSymbol::new("sEUR").unwrap();
        let b = AssetSymbol::new("sEUR").unwrap();
        let c = AssetSymbol::new("seur").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert_eq!(AssetSymbol::new(""), Err(AssetSymbolError::Empty));
        assert!(matches!(
            AssetSymbol::new("TOOLONGSYMBOL"),
            Err(AssetSymbolError::TooLong(_))
        ));
        assert!(matches!(
            AssetSymbol::new("s USD"),
            Err(AssetSymbolError::InvalidByte(_))
        ));
        assert!(matches!(
            AssetSymbol::new("sUSD\u{fc}"),
            Err(AssetSymbolError::InvalidByte(_))
        ));
    }

    #[test]
    fn test_from_static_matches_runtime_constructor() {
        const HOME: AssetSymbol = AssetSymbol::from_static("sUSD");
        assert_eq!(HOME, AssetSymbol::new("sUSD").unwrap());
    }

    #[test]
    fn test_max_width() {
        let sym = AssetSymbol::new("ABCDEFGH").unwrap();
        assert_eq!(sym.as_str(), "ABCDEFGH");
    }

    #[test]
    fn test_serde() {
        let sym = AssetSymbol::new("sBTC").unwrap();
        let json = serde_json::to_string(&sym).unwrap();
        assert_eq!(json, "\"sBTC\"");

        let back: AssetSymbol = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sym);
    }
}
